use std::{fmt::Display, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;
use get_sign::Outcome;
use symbolic::{InputSource, KTest, KTestObject, Symbolic};
use tracing::debug;

/// Name of the input declared by the `get_sign` binary.
const INPUT: &str = "a";

pub fn show(path: &Path) -> Result<String> {
    let test = KTest::read_from(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    Ok(render(path, &test))
}

/// Renders a test case in the layout of the `ktest-tool` that ships with
/// KLEE.
pub fn render(path: &Path, test: &KTest) -> String {
    Rendered { path, test }.to_string()
}

struct Rendered<'a> {
    path: &'a Path,
    test: &'a KTest,
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let args = self
            .test
            .args
            .iter()
            .map(|arg| format!("'{arg}'"))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(f, "ktest file : '{}'", self.path.display())?;
        writeln!(f, "args       : [{args}]")?;
        writeln!(f, "num objects: {}", self.test.objects.len())?;
        for (idx, object) in self.test.objects.iter().enumerate() {
            write_object(f, idx, object)?;
        }
        Ok(())
    }
}

fn write_object(
    f: &mut std::fmt::Formatter<'_>,
    idx: usize,
    object: &KTestObject,
) -> std::fmt::Result {
    writeln!(f, "object {idx}: name: '{}'", object.name)?;
    writeln!(f, "object {idx}: size: {}", object.bytes.len())?;
    writeln!(f, "object {idx}: data: {}", object.data())?;
    writeln!(f, "object {idx}: hex : {}", object.hex())?;
    if let (Some(int), Some(uint)) = (object.as_int(), object.as_uint()) {
        writeln!(f, "object {idx}: int : {int}")?;
        writeln!(f, "object {idx}: uint: {uint}")?;
    }
    writeln!(f, "object {idx}: text: {}", object.text())
}

pub fn record(name: &str, value: i32, output: &Path) -> Result<()> {
    let mut test = KTest::new(vec!["get_sign".to_owned()]);
    test.push_object(KTestObject::new(name, value.to_recorded()));
    test.write_to(output)
        .with_context(|| format!("Unable to write {}", output.display()))?;
    println!("Wrote {} ({name} = {value})", output.display());
    Ok(())
}

/// Replays one test case in-process, returning the input and the outcome.
pub fn replay(path: &Path) -> Result<(i32, Outcome)> {
    let test = KTest::read_from(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    let mut source = InputSource::replay(test);
    let a = i32::any(&mut source, INPUT)
        .with_context(|| format!("Unable to replay `{INPUT}` from {}", path.display()))?;
    debug!("Replaying {} with {} = {}", path.display(), INPUT, a);
    Ok((a, get_sign::run(a)))
}

pub fn report(label: &str, a: i32, outcome: Outcome) -> String {
    let status = outcome.exit_status();
    let line = format!("{label}: {INPUT} = {a}: {outcome}, {status}");
    if outcome.is_fault() {
        format!("{}", line.red())
    } else {
        format!("{}", line.green())
    }
}
