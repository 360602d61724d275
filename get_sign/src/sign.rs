/// Returns 0 for zero, -1 for negative and 1 for positive `x`.
pub fn get_sign(x: i32) -> i32 {
    if x == 0 {
        return 0;
    }

    if x < 0 {
        -1
    } else {
        1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub fn of(x: i32) -> Self {
        match get_sign(x) {
            0 => Self::Zero,
            -1 => Self::Negative,
            _ => Self::Positive,
        }
    }

    pub fn value(self) -> i32 {
        match self {
            Self::Negative => -1,
            Self::Zero => 0,
            Self::Positive => 1,
        }
    }

    /// The value as a process exit code, -1 wraps to 255.
    pub fn exit_code(self) -> u8 {
        self.value() as u8
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative => write!(f, "negative"),
            Self::Zero => write!(f, "zero"),
            Self::Positive => write!(f, "positive"),
        }
    }
}
