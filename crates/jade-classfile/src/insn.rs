//! Decoded instructions and the read-only method-body view
//!
//! Every instruction arrives with its immediate operand already decoded:
//! pool indices are resolved to values or symbol references, branch
//! offsets to instruction indices, and the `wide`-prefixed and short
//! indexed forms are normalized so the lifter sees one uniform shape per
//! opcode family.

use crate::opcode::Opcode;
use crate::pool::PoolValue;
use jade_types::{FieldRef, MethodRef, Type};

/// A decoded jump table; targets are instruction indices
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchTable {
    /// `(key, target)` pairs in table order
    pub cases: Vec<(i32, usize)>,
    /// Target when no key matches
    pub default: usize,
}

/// The decoded immediate operand of one instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No immediate operand
    None,
    /// A signed byte immediate (`bipush`)
    Byte(i8),
    /// A signed short immediate (`sipush`)
    Short(i16),
    /// A local-variable slot index
    Slot(u16),
    /// A resolved loadable constant (`ldc` family)
    Pool(PoolValue),
    /// A resolved field reference
    Field(FieldRef),
    /// A resolved method reference
    Method(MethodRef),
    /// A resolved class, array or element type
    TypeRef(Type),
    /// Array type and supplied dimension count for `multianewarray`
    MultiArray {
        /// The full array type being allocated
        ty: Type,
        /// How many dimension lengths are on the stack
        dims: u8,
    },
    /// A branch target, as an instruction index
    Branch(usize),
    /// A decoded switch table
    Switch(SwitchTable),
    /// Slot and signed delta for `iinc`
    Increment {
        /// Local slot to increment
        slot: u16,
        /// Signed increment amount
        delta: i16,
    },
}

/// One decoded instruction
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// The opcode
    pub opcode: Opcode,
    /// Its decoded immediate operand
    pub operand: Operand,
}

impl Instruction {
    /// Create a decoded instruction
    pub fn new(opcode: Opcode, operand: Operand) -> Self {
        Self { opcode, operand }
    }

    /// Create an instruction with no immediate operand
    pub fn plain(opcode: Opcode) -> Self {
        Self::new(opcode, Operand::None)
    }
}

/// Read-only view over a decoded method body
///
/// Construction normalizes the short indexed load/store forms to carry an
/// explicit [`Operand::Slot`] and synthesizes the byte offset each
/// instruction would have in a Code attribute, including the alignment
/// padding of the switch encodings and the `wide` prefix forced by large
/// slot numbers.
#[derive(Debug, Clone, Default)]
pub struct InstructionView {
    insns: Vec<Instruction>,
    offsets: Vec<usize>,
}

impl InstructionView {
    /// Build a view over decoded instructions
    pub fn new(mut insns: Vec<Instruction>) -> Self {
        for insn in &mut insns {
            if insn.operand == Operand::None {
                if let Some(slot) = insn.opcode.implicit_slot() {
                    insn.operand = Operand::Slot(slot);
                }
            }
        }
        let mut offsets = Vec::with_capacity(insns.len());
        let mut offset = 0;
        for insn in &insns {
            offsets.push(offset);
            offset += encoded_len(offset, insn);
        }
        Self { insns, offsets }
    }

    /// Number of instructions
    pub fn len(&self) -> usize {
        self.insns.len()
    }

    /// True when the body has no instructions
    pub fn is_empty(&self) -> bool {
        self.insns.is_empty()
    }

    /// The opcode at instruction index `i`
    ///
    /// Panics when `i` is out of range, like slice indexing.
    pub fn opcode(&self, i: usize) -> Opcode {
        self.insns[i].opcode
    }

    /// The decoded operand at instruction index `i`
    ///
    /// Panics when `i` is out of range, like slice indexing.
    pub fn operand(&self, i: usize) -> &Operand {
        &self.insns[i].operand
    }

    /// The synthesized Code-attribute byte offset of instruction `i`
    ///
    /// Panics when `i` is out of range, like slice indexing.
    pub fn byte_offset(&self, i: usize) -> usize {
        self.offsets[i]
    }

    /// The instruction at index `i`, if any
    pub fn get(&self, i: usize) -> Option<&Instruction> {
        self.insns.get(i)
    }

    /// Iterate over the decoded instructions
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.insns.iter()
    }
}

/// Encoded byte length of `insn` when placed at `offset`.
fn encoded_len(offset: usize, insn: &Instruction) -> usize {
    use Opcode::*;
    match insn.opcode {
        Tableswitch => {
            let pad = (4 - (offset + 1) % 4) % 4;
            let cases = switch_cases(insn);
            1 + pad + 12 + 4 * cases
        }
        Lookupswitch => {
            let pad = (4 - (offset + 1) % 4) % 4;
            let cases = switch_cases(insn);
            1 + pad + 8 + 8 * cases
        }
        Iload | Lload | Fload | Dload | Aload | Istore | Lstore | Fstore | Dstore | Astore => {
            match insn.operand {
                // wide prefix, opcode, 16-bit index
                Operand::Slot(slot) if slot > u8::MAX as u16 => 4,
                _ => 2,
            }
        }
        Iinc => match insn.operand {
            Operand::Increment { slot, delta }
                if slot > u8::MAX as u16 || i8::try_from(delta).is_err() =>
            {
                6
            }
            _ => 3,
        },
        Bipush | Ldc | Newarray => 2,
        Sipush | LdcW | Ldc2W => 3,
        Ifeq | Ifne | Iflt | Ifge | Ifgt | Ifle | IfIcmpeq | IfIcmpne | IfIcmplt | IfIcmpge
        | IfIcmpgt | IfIcmple | IfAcmpeq | IfAcmpne | Ifnull | Ifnonnull | Goto | Jsr => 3,
        GotoW | JsrW => 5,
        Getstatic | Putstatic | Getfield | Putfield | Invokevirtual | Invokespecial
        | Invokestatic | New | Anewarray | Checkcast | Instanceof => 3,
        Invokeinterface => 5,
        Multianewarray => 4,
        _ => 1,
    }
}

fn switch_cases(insn: &Instruction) -> usize {
    match &insn.operand {
        Operand::Switch(table) => table.cases.len(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_forms_get_explicit_slots() {
        let view = InstructionView::new(vec![
            Instruction::plain(Opcode::Iload1),
            Instruction::plain(Opcode::Astore2),
        ]);
        assert_eq!(*view.operand(0), Operand::Slot(1));
        assert_eq!(*view.operand(1), Operand::Slot(2));
    }

    #[test]
    fn test_byte_offsets() {
        let view = InstructionView::new(vec![
            Instruction::plain(Opcode::Iconst3),                       // 1 byte
            Instruction::new(Opcode::Bipush, Operand::Byte(10)),       // 2 bytes
            Instruction::new(Opcode::Iload, Operand::Slot(5)),         // 2 bytes
            Instruction::new(Opcode::Goto, Operand::Branch(0)),        // 3 bytes
            Instruction::plain(Opcode::Return),
        ]);
        assert_eq!(view.byte_offset(0), 0);
        assert_eq!(view.byte_offset(1), 1);
        assert_eq!(view.byte_offset(2), 3);
        assert_eq!(view.byte_offset(3), 5);
        assert_eq!(view.byte_offset(4), 8);
    }

    #[test]
    fn test_wide_slots_lengthen_encoding() {
        let view = InstructionView::new(vec![
            Instruction::new(Opcode::Iload, Operand::Slot(300)), // wide: 4 bytes
            Instruction::plain(Opcode::Return),
        ]);
        assert_eq!(view.byte_offset(1), 4);
    }

    #[test]
    fn test_tableswitch_padding() {
        let table = SwitchTable {
            cases: vec![(0, 3), (1, 3)],
            default: 3,
        };
        let view = InstructionView::new(vec![
            Instruction::plain(Opcode::Iconst0),
            Instruction::new(Opcode::Tableswitch, Operand::Switch(table)),
            Instruction::plain(Opcode::Nop),
            Instruction::plain(Opcode::Return),
        ]);
        // switch at offset 1: opcode byte, 2 pad bytes, 12 header, 8 table
        assert_eq!(view.byte_offset(2), 1 + 1 + 2 + 12 + 8);
    }
}
