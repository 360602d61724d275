//! Reader and writer for `.ktest` test-case files.
//!
//! A test case is a concrete assignment to every memory region that was
//! marked symbolic, together with the arguments the program was started with.
//! All integers in the file are big-endian `u32`s and strings are stored as a
//! length followed by the raw bytes.
//!
//! ```text
//! magic        "KTEST" (or the older "BOUT\n")
//! version      u32
//! num_args     u32, then num_args strings
//! sym_argvs    u32 (version >= 2)
//! sym_argv_len u32 (version >= 2)
//! num_objects  u32, then per object: name, num_bytes u32, bytes
//! ```
use std::{fs, path::Path};

use thiserror::Error;
use tracing::{debug, trace};

const MAGIC: &[u8; 5] = b"KTEST";
const LEGACY_MAGIC: &[u8; 5] = b"BOUT\n";

/// Version written by [`KTest::to_bytes`] and the newest version accepted
/// when reading.
pub const CURRENT_VERSION: u32 = 3;

pub type Result<T> = std::result::Result<T, KTestError>;

#[derive(Debug, Error)]
pub enum KTestError {
    #[error("Unable to access test case {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a ktest file (magic {0:?})")]
    BadMagic(Vec<u8>),

    #[error("Unsupported ktest version {0}")]
    UnsupportedVersion(u32),

    #[error("Test case ended while reading {0}")]
    Truncated(&'static str),

    #[error("Field {0} is not valid UTF-8")]
    InvalidString(&'static str),

    #[error("Field {0} is too large for a ktest file")]
    TooLarge(&'static str),
}

/// One named memory region and the concrete bytes assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KTestObject {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl KTestObject {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Signed interpretation in native byte order, for 1, 2, 4 and 8 byte
    /// objects.
    pub fn as_int(&self) -> Option<i64> {
        match self.bytes.len() {
            1 => Some(i8::from_ne_bytes([self.bytes[0]]) as i64),
            2 => Some(i16::from_ne_bytes(self.bytes[..].try_into().ok()?) as i64),
            4 => Some(i32::from_ne_bytes(self.bytes[..].try_into().ok()?) as i64),
            8 => Some(i64::from_ne_bytes(self.bytes[..].try_into().ok()?)),
            _ => None,
        }
    }

    /// Unsigned interpretation in native byte order, for 1, 2, 4 and 8 byte
    /// objects.
    pub fn as_uint(&self) -> Option<u64> {
        match self.bytes.len() {
            1 => Some(self.bytes[0] as u64),
            2 => Some(u16::from_ne_bytes(self.bytes[..].try_into().ok()?) as u64),
            4 => Some(u32::from_ne_bytes(self.bytes[..].try_into().ok()?) as u64),
            8 => Some(u64::from_ne_bytes(self.bytes[..].try_into().ok()?)),
            _ => None,
        }
    }

    /// Bytes as one hex literal in storage order, e.g. `0xfbffffff`.
    pub fn hex(&self) -> String {
        let digits = self
            .bytes
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<String>();
        format!("0x{digits}")
    }

    /// Bytes as an escaped byte string, e.g. `b'\xfb\xff\xff\xff'`.
    pub fn data(&self) -> String {
        let escaped = self
            .bytes
            .iter()
            .flat_map(|byte| std::ascii::escape_default(*byte))
            .map(char::from)
            .collect::<String>();
        format!("b'{escaped}'")
    }

    /// Printable ASCII kept as is, everything else shown as `.`.
    pub fn text(&self) -> String {
        self.bytes
            .iter()
            .map(|byte| match byte {
                0x20..=0x7e => *byte as char,
                _ => '.',
            })
            .collect()
    }
}

/// A recorded test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KTest {
    pub version: u32,
    pub args: Vec<String>,
    pub sym_argvs: u32,
    pub sym_argv_len: u32,
    pub objects: Vec<KTestObject>,
}

impl KTest {
    /// Creates an empty test case for a program started with `args`.
    pub fn new(args: Vec<String>) -> Self {
        Self {
            version: CURRENT_VERSION,
            args,
            sym_argvs: 0,
            sym_argv_len: 0,
            objects: vec![],
        }
    }

    pub fn push_object(&mut self, object: KTestObject) {
        self.objects.push(object);
    }

    /// First object called `name`.
    pub fn object(&self, name: &str) -> Option<&KTestObject> {
        self.objects.iter().find(|object| object.name == name)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading test case: {}", path.display());
        let data = fs::read(path).map_err(|source| KTestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&data)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!("Writing test case: {}", path.display());
        fs::write(path, self.to_bytes()?).map_err(|source| KTestError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = Reader { data };

        let magic = reader.take(MAGIC.len(), "magic")?;
        if magic != MAGIC && magic != LEGACY_MAGIC {
            return Err(KTestError::BadMagic(magic.to_vec()));
        }

        let version = reader.u32("version")?;
        if version == 0 || version > CURRENT_VERSION {
            return Err(KTestError::UnsupportedVersion(version));
        }

        let num_args = reader.u32("argument count")?;
        let mut args = vec![];
        for _ in 0..num_args {
            args.push(reader.string("argument")?);
        }

        let (sym_argvs, sym_argv_len) = if version >= 2 {
            (reader.u32("sym_argvs")?, reader.u32("sym_argv_len")?)
        } else {
            (0, 0)
        };

        let num_objects = reader.u32("object count")?;
        let mut objects = vec![];
        for _ in 0..num_objects {
            let name = reader.string("object name")?;
            let size = reader.u32("object size")? as usize;
            let bytes = reader.take(size, "object bytes")?.to_vec();
            trace!("Read object {name} ({size} bytes)");
            objects.push(KTestObject { name, bytes });
        }

        if !reader.data.is_empty() {
            trace!("Ignoring {} trailing bytes", reader.data.len());
        }

        Ok(Self {
            version,
            args,
            sym_argvs,
            sym_argv_len,
            objects,
        })
    }

    /// Encodes the test case. The output always uses the current magic and
    /// version.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = MAGIC.to_vec();
        write_u32(&mut out, CURRENT_VERSION);

        write_len(&mut out, self.args.len(), "argument count")?;
        for arg in &self.args {
            write_bytes(&mut out, arg.as_bytes(), "argument")?;
        }

        write_u32(&mut out, self.sym_argvs);
        write_u32(&mut out, self.sym_argv_len);

        write_len(&mut out, self.objects.len(), "object count")?;
        for object in &self.objects {
            write_bytes(&mut out, object.name.as_bytes(), "object name")?;
            write_bytes(&mut out, &object.bytes, "object bytes")?;
        }
        Ok(out)
    }
}

struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8]> {
        if self.data.len() < len {
            return Err(KTestError::Truncated(field));
        }
        let (head, tail) = self.data.split_at(len);
        self.data = tail;
        Ok(head)
    }

    fn u32(&mut self, field: &'static str) -> Result<u32> {
        let bytes = self.take(4, field)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn string(&mut self, field: &'static str) -> Result<String> {
        let len = self.u32(field)? as usize;
        let bytes = self.take(len, field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| KTestError::InvalidString(field))
    }
}

fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn write_len(out: &mut Vec<u8>, len: usize, field: &'static str) -> Result<()> {
    let len = u32::try_from(len).map_err(|_| KTestError::TooLarge(field))?;
    write_u32(out, len);
    Ok(())
}

fn write_bytes(out: &mut Vec<u8>, bytes: &[u8], field: &'static str) -> Result<()> {
    write_len(out, bytes.len(), field)?;
    out.extend_from_slice(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test case as written for `get_sign.bc` with `a = -5` on a little
    /// endian host.
    fn division_fault_case() -> Vec<u8> {
        let mut data = b"KTEST".to_vec();
        data.extend_from_slice(&3u32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&11u32.to_be_bytes());
        data.extend_from_slice(b"get_sign.bc");
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(b"a");
        data.extend_from_slice(&4u32.to_be_bytes());
        data.extend_from_slice(&(-5i32).to_ne_bytes());
        data
    }

    #[test]
    fn parses_recorded_case() {
        let test = KTest::from_bytes(&division_fault_case()).unwrap();
        assert_eq!(test.version, 3);
        assert_eq!(test.args, vec!["get_sign.bc".to_owned()]);
        assert_eq!(test.objects.len(), 1);

        let a = test.object("a").unwrap();
        assert_eq!(a.bytes.len(), 4);
        assert_eq!(a.as_int(), Some(-5));
        assert_eq!(a.as_uint(), Some(4294967291));
    }

    #[test]
    fn encoding_matches_recorded_layout() {
        let mut test = KTest::new(vec!["get_sign.bc".to_owned()]);
        test.push_object(KTestObject::new("a", (-5i32).to_ne_bytes()));
        assert_eq!(test.to_bytes().unwrap(), division_fault_case());
    }

    #[test]
    fn legacy_magic_version_one() {
        let mut data = b"BOUT\n".to_vec();
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        // no sym_argvs fields in version 1
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(b"x");
        data.extend_from_slice(&1u32.to_be_bytes());
        data.push(0xff);

        let test = KTest::from_bytes(&data).unwrap();
        assert_eq!(test.version, 1);
        assert_eq!(test.object("x").unwrap().as_int(), Some(-1));
    }

    #[test]
    fn legacy_magic_keeps_stored_version() {
        let mut data = b"BOUT\n".to_vec();
        data.extend_from_slice(&2u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(b"a");
        data.extend_from_slice(&4u32.to_be_bytes());
        data.extend_from_slice(&(-5i32).to_ne_bytes());

        let test = KTest::from_bytes(&data).unwrap();
        assert_eq!(test.version, 2);
        assert_eq!(test.objects.len(), 1);
        assert_eq!(test.object("a").unwrap().as_int(), Some(-5));
    }

    #[test]
    fn legacy_magic_rejects_future_versions() {
        let mut data = b"BOUT\n".to_vec();
        data.extend_from_slice(&7u32.to_be_bytes());
        let result = KTest::from_bytes(&data);
        assert!(matches!(result, Err(KTestError::UnsupportedVersion(7))));
    }

    #[test]
    fn rejects_bad_magic() {
        let result = KTest::from_bytes(b"ELF\x7f\x00\x00\x00\x03");
        assert!(matches!(result, Err(KTestError::BadMagic(_))));
    }

    #[test]
    fn rejects_future_versions() {
        let mut data = b"KTEST".to_vec();
        data.extend_from_slice(&4u32.to_be_bytes());
        let result = KTest::from_bytes(&data);
        assert!(matches!(result, Err(KTestError::UnsupportedVersion(4))));
    }

    #[test]
    fn reports_truncation() {
        let mut data = division_fault_case();
        data.truncate(data.len() - 2);
        let result = KTest::from_bytes(&data);
        assert!(matches!(result, Err(KTestError::Truncated("object bytes"))));
    }

    #[test]
    fn object_renderings() {
        let object = KTestObject::new("s", *b"hi\n\xff");
        assert_eq!(object.hex(), "0x68690aff");
        assert_eq!(object.data(), "b'hi\\n\\xff'");
        assert_eq!(object.text(), "hi..");

        let odd = KTestObject::new("odd", vec![1, 2, 3]);
        assert_eq!(odd.as_int(), None);
        assert_eq!(odd.as_uint(), None);
    }
}
