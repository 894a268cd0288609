use crate::compiler::Ident;

use std::collections::HashMap;

extern crate log;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Int,
    Char,
}

impl VarKind {
    /// Bytes the variable occupies in the data segment
    pub fn size(&self) -> u32 {
        match self {
            VarKind::Int => 8,
            VarKind::Char => 1,
        }
    }

    pub fn align(&self) -> u32 {
        self.size()
    }

    pub fn name(&self) -> &'static str {
        match self {
            VarKind::Int => "int",
            VarKind::Char => "char",
        }
    }

    /// Narrows a value to what this kind can hold after a store/load pair.
    /// Chars keep the sign extended low byte since `lb` sign extends.
    pub fn narrow(&self, value: i64) -> i64 {
        match self {
            VarKind::Int => value,
            VarKind::Char => value as i8 as i64,
        }
    }
}

impl std::fmt::Display for VarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: Ident,
    pub kind: VarKind,
    /// Byte offset of the variable in the data segment
    pub slot: u32,
    pub has_value: bool,
    pub value: Option<i64>,
}

impl Symbol {
    pub fn set_value(&mut self, value: i64) {
        self.has_value = true;
        self.value = Some(self.kind.narrow(value));
    }
}

/// Variables in declaration order, with name lookup.
/// Symbols are never removed during a run.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_name: HashMap<Ident, usize>,
    next_slot: u32,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    /// Returns None (leaving the table untouched) when `name` already exists
    pub fn declare(&mut self, name: &str, kind: VarKind) -> Option<&Symbol> {
        if self.by_name.contains_key(name) {
            return None;
        }

        let align = kind.align();
        let slot = (self.next_slot + align - 1) / align * align;
        self.next_slot = slot + kind.size();
        debug!("Declared {} {} at offset {}", kind, name, slot);

        self.by_name.insert(name.to_string(), self.symbols.len());
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
            slot,
            has_value: false,
            value: None,
        });
        self.symbols.last()
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.by_name.get(name).map(|i| &self.symbols[*i])
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        match self.by_name.get(name) {
            Some(i) => self.symbols.get_mut(*i),
            None => None
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Returns false if there is no such variable
    pub fn assign(&mut self, name: &str, value: i64) -> bool {
        match self.lookup_mut(name) {
            Some(symbol) => {
                symbol.set_value(value);
                true
            },
            None => false
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Total bytes of the data segment so far
    pub fn data_size(&self) -> u32 {
        self.next_slot
    }

    pub fn iter(&self) -> std::slice::Iter<Symbol> {
        self.symbols.iter()
    }
}
