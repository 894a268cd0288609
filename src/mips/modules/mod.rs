pub mod edumips64;

#[macro_export]
macro_rules! create_enum_str_map {
    ($($id:ident { $($opt_id:ident),* $(,)? })*) => {
        $(pub struct $id {}
          #[allow(dead_code)]
          #[allow(non_upper_case_globals)]
          impl $id {
            $(const $opt_id: &'static str = stringify!($opt_id);)*

            pub fn get_vec() -> Vec<&'static str> {
                return vec![$(stringify!($opt_id)),*]
            }
        })*
    }
}

/// Describes what an assembler dialect accepts
pub struct MipsModule {
    pub name: &'static str,
    pub supported_instructions: Vec<&'static str>,
    pub supported_directives: Vec<&'static str>,
}

impl MipsModule {
    pub fn supports_instruction(&self, name: &str) -> bool {
        self.supported_instructions.iter().any(|i| i.eq_ignore_ascii_case(name))
    }

    /// `directive` is given without its leading '.'
    pub fn supports_directive(&self, directive: &str) -> bool {
        self.supported_directives.iter().any(|d| d.eq_ignore_ascii_case(directive))
    }
}

pub use edumips64::load_edumips64_module;
