use crate::mips::Register;

/// Knobs for one compilation run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Temporaries are handed out from `first_temp` up to `last_temp` inclusive
    pub first_temp: Register,
    pub last_temp: Register,
    /// Emit `.word`/`.byte` with the declared value instead of `.space`
    pub preinit_data: bool,
    /// Finish `.text` with a `syscall` so the simulator stops
    pub emit_exit: bool,
    /// Prefix each statement with a `# line N: source` comment
    pub emit_comments: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            first_temp: Register::T_FIRST,
            last_temp: Register::T_LAST,
            preinit_data: false,
            emit_exit: true,
            emit_comments: false,
        }
    }
}

impl Config {
    /// How many temporaries an expression may hold live at once
    pub fn temp_count(&self) -> usize {
        if self.last_temp < self.first_temp {
            0
        } else {
            (self.last_temp.number() - self.first_temp.number()) as usize + 1
        }
    }
}
