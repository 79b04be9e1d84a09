//! Pretty-printing for lifted methods
//!
//! Renders expressions in a compact source-like form and interleaves
//! instruction mnemonics with what each instruction contributed, for
//! debugging lifts by eye.

use crate::ir::node::{Expr, ExprId, Op, OpId};
use crate::ir::IrGraph;
use crate::lift::{InsnEffect, LiftedMethod};
use jade_classfile::Method;
use jade_types::Type;
use std::fmt::Write;

/// Trait for pretty-printing lift constructs
pub trait PrettyPrint {
    /// Produce the human-readable rendition
    fn pretty_print(&self) -> String;
}

impl IrGraph {
    /// Render an expression as compact source-like text.
    ///
    /// Phi inputs are shown as ids rather than recursed into; a loop phi
    /// reaches itself through its own inputs.
    pub fn render_expr(&self, id: ExprId) -> String {
        match self.expr(id) {
            Expr::Argument { name, .. } => name.clone(),
            Expr::Constant(c) => c.to_string(),
            Expr::Phi { inputs } => {
                let ids: Vec<String> = inputs.iter().map(|e| e.to_string()).collect();
                format!("phi({})", ids.join(", "))
            }
            Expr::Binary { op, lhs, rhs } => {
                format!("({} {} {})", self.render_expr(*lhs), op, self.render_expr(*rhs))
            }
            Expr::Compare { op, lhs, rhs } => {
                format!("({} {} {})", self.render_expr(*lhs), op, self.render_expr(*rhs))
            }
            Expr::Not { value } => format!("!{}", self.render_expr(*value)),
            Expr::Cast { value, target } => {
                format!("(({}) {})", target, self.render_expr(*value))
            }
            Expr::InstanceOf { value, probe } => {
                format!("({} instanceof {})", self.render_expr(*value), probe)
            }
            Expr::LoadField { field, object } => match object {
                Some(object) => format!("{}.{}", self.render_expr(*object), field.name),
                None => format!("{}.{}", field.owner, field.name),
            },
            Expr::LoadElement { array, index } => {
                format!("{}[{}]", self.render_expr(*array), self.render_expr(*index))
            }
            Expr::ArrayLen { array } => format!("{}.length", self.render_expr(*array)),
            Expr::Allocate { ty, dims } => self.render_allocation(ty, dims),
            Expr::Invoke {
                method,
                args,
                object,
                ..
            } => {
                let receiver = match object {
                    Some(object) => self.render_expr(*object),
                    None => method.owner.to_string(),
                };
                let args: Vec<String> = args.iter().map(|a| self.render_expr(*a)).collect();
                format!("{}.{}({})", receiver, method.name, args.join(", "))
            }
            Expr::RetAddr { target } => format!("retaddr@{}", target),
        }
    }

    fn render_allocation(&self, ty: &Type, dims: &[ExprId]) -> String {
        if dims.is_empty() {
            return format!("new {}", ty);
        }
        let (element, total_dims) = match ty {
            Type::Array { element, dims } => ((**element).clone(), *dims as usize),
            other => (other.clone(), dims.len()),
        };
        let mut out = format!("new {}", element);
        for length in dims {
            let _ = write!(out, "[{}]", self.render_expr(*length));
        }
        for _ in dims.len()..total_dims {
            out.push_str("[]");
        }
        out
    }

    /// Render an operation as one statement-like line
    pub fn render_op(&self, id: OpId) -> String {
        match self.op(id) {
            Op::StoreField {
                field,
                value,
                object,
            } => {
                let place = match object {
                    Some(object) => format!("{}.{}", self.render_expr(*object), field.name),
                    None => format!("{}.{}", field.owner, field.name),
                };
                format!("{} = {}", place, self.render_expr(*value))
            }
            Op::StoreElement {
                array,
                index,
                value,
            } => format!(
                "{}[{}] = {}",
                self.render_expr(*array),
                self.render_expr(*index),
                self.render_expr(*value)
            ),
            Op::Return { value: Some(value) } => format!("return {}", self.render_expr(*value)),
            Op::Return { value: None } => "return".to_string(),
            Op::Throw { value } => format!("throw {}", self.render_expr(*value)),
            Op::Branch {
                condition: Some(condition),
                target,
            } => format!("if {} goto {}", self.render_expr(*condition), target),
            Op::Branch {
                condition: None,
                target,
            } => format!("goto {}", target),
            Op::SubroutineCall { target } => format!("jsr {}", target),
            Op::SubroutineReturn => "ret".to_string(),
            Op::Switch { selector, table } => format!(
                "switch {} [{} cases, default {}]",
                self.render_expr(*selector),
                table.cases.len(),
                table.default
            ),
            Op::MonitorEnter { value } => format!("monitorenter {}", self.render_expr(*value)),
            Op::MonitorExit { value } => format!("monitorexit {}", self.render_expr(*value)),
            Op::Discard { value } => self.render_expr(*value),
        }
    }
}

/// A lifted method paired with its envelope, ready for listing
pub struct Listing<'a> {
    /// The decoded envelope the lift consumed
    pub method: &'a Method,
    /// The lift result being listed
    pub lifted: &'a LiftedMethod,
}

impl PrettyPrint for Listing<'_> {
    fn pretty_print(&self) -> String {
        let mut out = String::new();
        let args: Vec<String> = self.method.args.iter().map(|a| a.to_string()).collect();
        let _ = writeln!(
            out,
            "{}{} {}.{}({})",
            if self.method.is_static { "static " } else { "" },
            self.method.ret,
            self.method.owner,
            self.method.name,
            args.join(", ")
        );
        for i in 0..self.method.code.len() {
            let mnemonic = self.method.code.opcode(i).mnemonic();
            let note = match self.lifted.effects[i] {
                InsnEffect::Pushed(e) => format!("push {}", self.lifted.graph.render_expr(e)),
                InsnEffect::Emitted(op) => self.lifted.graph.render_op(op),
                InsnEffect::StackOnly => String::new(),
                InsnEffect::NoOp => String::new(),
            };
            if note.is_empty() {
                let _ = writeln!(out, "{:5}  {}", i, mnemonic);
            } else {
                let _ = writeln!(out, "{:5}  {:<16} {}", i, mnemonic, note);
            }
        }
        out
    }
}

impl LiftedMethod {
    /// The per-instruction debug listing for this lift
    pub fn listing(&self, method: &Method) -> String {
        Listing {
            method,
            lifted: self,
        }
        .pretty_print()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::node::{BinOp, CmpOp, Const};
    use jade_types::FieldRef;

    #[test]
    fn test_render_arithmetic() {
        let mut g = IrGraph::new();
        let a = g.add_expr(Expr::Argument {
            name: "arg1".to_string(),
            ty: Type::INT,
        });
        let one = g.add_expr(Expr::Constant(Const::Int(1)));
        let sum = g.add_expr(Expr::Binary {
            op: BinOp::Add,
            lhs: a,
            rhs: one,
        });
        assert_eq!(g.render_expr(sum), "(arg1 + 1)");
    }

    #[test]
    fn test_render_negated_comparison() {
        let mut g = IrGraph::new();
        let a = g.add_expr(Expr::Argument {
            name: "arg1".to_string(),
            ty: Type::INT,
        });
        let zero = g.add_expr(Expr::Constant(Const::Int(0)));
        let cmp = g.add_expr(Expr::Compare {
            op: CmpOp::Lt,
            lhs: a,
            rhs: zero,
        });
        let not = g.add_expr(Expr::Not { value: cmp });
        assert_eq!(g.render_expr(not), "!(arg1 < 0)");
    }

    #[test]
    fn test_render_field_store() {
        let mut g = IrGraph::new();
        let field = FieldRef::new(Type::reference("com/example/C"), "count", Type::INT);
        let value = g.add_expr(Expr::Constant(Const::Int(7)));
        let op = g.add_op(Op::StoreField {
            field,
            value,
            object: None,
        });
        assert_eq!(g.render_op(op), "com.example.C.count = 7");
    }

    #[test]
    fn test_render_allocation() {
        let mut g = IrGraph::new();
        let len = g.add_expr(Expr::Constant(Const::Int(4)));
        let alloc = g.add_expr(Expr::Allocate {
            ty: Type::INT.make_array(2),
            dims: vec![len],
        });
        assert_eq!(g.render_expr(alloc), "new int[4][]");
    }

    #[test]
    fn test_render_phi_uses_ids() {
        let mut g = IrGraph::new();
        let a = g.add_expr(Expr::Constant(Const::Int(1)));
        let b = g.add_expr(Expr::Constant(Const::Int(2)));
        let phi = g.add_expr(Expr::Phi { inputs: vec![a, b] });
        assert_eq!(g.render_expr(phi), "phi(e0, e1)");
    }
}
