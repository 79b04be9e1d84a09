//! Control-flow bookkeeping for the linear walk
//!
//! A syntactic pre-pass over the instruction view: per-instruction
//! predecessor lists (fallthrough plus branch and switch edges) and the
//! set of subroutine entries. The lifter uses the in-degree to decide
//! where join resolution is needed and the subroutine entries to
//! materialize return-address values.

use jade_classfile::{InstructionView, Opcode, Operand};

#[derive(Debug)]
pub(crate) struct FlowInfo {
    /// Predecessor instruction indices per instruction, sorted ascending
    /// and deduplicated.
    pub preds: Vec<Vec<usize>>,
    /// True where at least one `jsr`/`jsr_w` targets the instruction.
    pub jsr_target: Vec<bool>,
}

pub(crate) fn analyze(code: &InstructionView) -> FlowInfo {
    let n = code.len();
    let mut preds = vec![Vec::new(); n];
    let mut jsr_target = vec![false; n];

    for i in 0..n {
        let opcode = code.opcode(i);
        if opcode.falls_through() && i + 1 < n {
            preds[i + 1].push(i);
        }
        if opcode.is_branch() {
            if let Operand::Branch(target) = code.operand(i) {
                if let Some(p) = preds.get_mut(*target) {
                    p.push(i);
                }
                if matches!(opcode, Opcode::Jsr | Opcode::JsrW) {
                    if let Some(t) = jsr_target.get_mut(*target) {
                        *t = true;
                    }
                }
            }
        } else if opcode.is_switch() {
            if let Operand::Switch(table) = code.operand(i) {
                if let Some(p) = preds.get_mut(table.default) {
                    p.push(i);
                }
                for (_, target) in &table.cases {
                    if let Some(p) = preds.get_mut(*target) {
                        p.push(i);
                    }
                }
            }
        }
    }

    for p in &mut preds {
        p.sort_unstable();
        p.dedup();
    }

    FlowInfo { preds, jsr_target }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jade_classfile::Instruction;

    #[test]
    fn test_fallthrough_and_branch_preds() {
        // 0: iload_0  1: ifeq->3  2: iconst_1  3: return
        let code = InstructionView::new(vec![
            Instruction::plain(Opcode::Iload0),
            Instruction::new(Opcode::Ifeq, Operand::Branch(3)),
            Instruction::plain(Opcode::Iconst1),
            Instruction::plain(Opcode::Return),
        ]);
        let flow = analyze(&code);
        assert_eq!(flow.preds[0], Vec::<usize>::new());
        assert_eq!(flow.preds[1], vec![0]);
        assert_eq!(flow.preds[2], vec![1]);
        assert_eq!(flow.preds[3], vec![1, 2]);
    }

    #[test]
    fn test_goto_does_not_fall_through() {
        // 0: goto->2  1: nop  2: return
        let code = InstructionView::new(vec![
            Instruction::new(Opcode::Goto, Operand::Branch(2)),
            Instruction::plain(Opcode::Nop),
            Instruction::plain(Opcode::Return),
        ]);
        let flow = analyze(&code);
        assert_eq!(flow.preds[1], Vec::<usize>::new());
        assert_eq!(flow.preds[2], vec![0, 1]);
    }

    #[test]
    fn test_jsr_targets_flagged() {
        let code = InstructionView::new(vec![
            Instruction::new(Opcode::Jsr, Operand::Branch(2)),
            Instruction::plain(Opcode::Return),
            Instruction::plain(Opcode::Astore0),
            Instruction::new(Opcode::Ret, Operand::Slot(0)),
        ]);
        let flow = analyze(&code);
        assert!(flow.jsr_target[2]);
        assert!(!flow.jsr_target[0]);
        assert_eq!(flow.preds[2], vec![0]);
    }

    #[test]
    fn test_switch_edges_dedup() {
        use jade_classfile::SwitchTable;
        let table = SwitchTable {
            cases: vec![(0, 2), (1, 2)],
            default: 2,
        };
        let code = InstructionView::new(vec![
            Instruction::plain(Opcode::Iconst0),
            Instruction::new(Opcode::Lookupswitch, Operand::Switch(table)),
            Instruction::plain(Opcode::Return),
        ]);
        let flow = analyze(&code);
        assert_eq!(flow.preds[2], vec![1]);
    }
}
