use crate::create_enum_str_map;
use crate::mips::Mnemonic;
use crate::mips::modules::MipsModule;

create_enum_str_map! {
    EduMips64Directives {
        align,
        ascii,
        asciiz,
        byte,
        code,
        data,
        double,
        space,
        text,
        word,
        word16,
        word32,
    }
}

pub fn load_edumips64_module() -> MipsModule {
    MipsModule {
        name: "edumips64",
        supported_instructions: Mnemonic::ALL.iter().map(|m| m.name()).collect(),
        supported_directives: EduMips64Directives::get_vec(),
    }
}
