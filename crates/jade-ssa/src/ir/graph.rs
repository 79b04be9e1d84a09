//! The node arena and derived typing
//!
//! Nodes are appended during a lift and addressed by stable indices, so
//! a node may be shared by any number of parents, locals and stack slots
//! without ownership questions. Expression types are derived from node
//! structure; the only stored types are the ones no child can supply
//! (arguments, constants, cast targets).

use crate::error::{LiftError, LiftResult};
use crate::ir::node::{Const, Expr, ExprId, Op, OpId};
use jade_types::Type;

/// Arena of lift nodes
#[derive(Debug, Clone, Default)]
pub struct IrGraph {
    exprs: Vec<Expr>,
    ops: Vec<Op>,
}

impl IrGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expression node
    pub fn add_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Append an operation node
    pub fn add_op(&mut self, op: Op) -> OpId {
        let id = OpId::new(self.ops.len() as u32);
        self.ops.push(op);
        id
    }

    /// The expression behind `id`
    ///
    /// Panics when `id` did not come from this graph.
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.as_u32() as usize]
    }

    /// The operation behind `id`
    ///
    /// Panics when `id` did not come from this graph.
    pub fn op(&self, id: OpId) -> &Op {
        &self.ops[id.as_u32() as usize]
    }

    /// Number of expression nodes
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Number of operation nodes
    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    /// Append an input to a phi while the lift is still in flight.
    ///
    /// Backward branches contribute their bindings only once their own
    /// instruction has been lifted; this is the single controlled
    /// mutation in an otherwise append-only graph.
    pub(crate) fn add_phi_input(&mut self, phi: ExprId, input: ExprId) {
        match &mut self.exprs[phi.as_u32() as usize] {
            Expr::Phi { inputs } => inputs.push(input),
            other => unreachable!("phi input appended to {:?}", other),
        }
    }

    /// The derived type of an expression
    ///
    /// Fails with `TypeMismatch` when binary operands disagree, with
    /// `PhiDisagreement` when phi inputs have no common type, and with
    /// `UntypedReturnAddress` for subroutine return addresses.
    pub fn expr_type(&self, id: ExprId) -> LiftResult<Type> {
        self.type_inner(id, &mut Vec::new())?
            .ok_or(LiftError::PhiDisagreement { types: Vec::new() })
    }

    /// Stack slots the value occupies: 2 for long/double, otherwise 1
    pub fn expr_width(&self, id: ExprId) -> LiftResult<usize> {
        if matches!(self.expr(id), Expr::RetAddr { .. }) {
            return Ok(1);
        }
        Ok(if self.expr_type(id)?.is_wide() { 2 } else { 1 })
    }

    /// Type derivation with a cycle guard.
    ///
    /// A phi in a loop can reach itself through its own inputs; such a
    /// self-reference constrains nothing and resolves to `None`, which
    /// the caller treats as "no opinion".
    fn type_inner(&self, id: ExprId, visiting: &mut Vec<ExprId>) -> LiftResult<Option<Type>> {
        match self.expr(id) {
            Expr::Argument { ty, .. } => Ok(Some(ty.clone())),
            Expr::Constant(c) => Ok(Some(c.ty())),
            Expr::Phi { inputs } => {
                if visiting.contains(&id) {
                    return Ok(None);
                }
                visiting.push(id);
                let result = self.phi_type(inputs, visiting);
                visiting.pop();
                result
            }
            Expr::Binary { op, lhs, rhs } => {
                let l = self.type_inner(*lhs, visiting)?;
                let r = self.type_inner(*rhs, visiting)?;
                match (l, r) {
                    (Some(l), Some(r)) => {
                        if l == r {
                            Ok(Some(l))
                        } else {
                            Err(LiftError::TypeMismatch {
                                op: op.to_string(),
                                expected: l.to_string(),
                                actual: r.to_string(),
                            })
                        }
                    }
                    (Some(t), None) | (None, Some(t)) => Ok(Some(t)),
                    (None, None) => Ok(None),
                }
            }
            Expr::Compare { .. } | Expr::Not { .. } | Expr::InstanceOf { .. } => {
                Ok(Some(Type::BOOLEAN))
            }
            Expr::Cast { target, .. } => Ok(Some(target.clone())),
            Expr::LoadField { field, .. } => Ok(Some(field.ty.clone())),
            Expr::LoadElement { array, .. } => match self.type_inner(*array, visiting)? {
                Some(array_ty) => Ok(Some(array_ty.element_type()?)),
                None => Ok(None),
            },
            Expr::ArrayLen { .. } => Ok(Some(Type::INT)),
            Expr::Allocate { ty, .. } => Ok(Some(ty.clone())),
            Expr::Invoke { method, .. } => Ok(Some(method.ret.clone())),
            Expr::RetAddr { .. } => Err(LiftError::UntypedReturnAddress),
        }
    }

    /// Unify the types of phi inputs.
    ///
    /// `null` constants unify with any reference type. Two distinct
    /// reference types unify to `java.lang.Object`; anything else is a
    /// disagreement.
    fn phi_type(&self, inputs: &[ExprId], visiting: &mut Vec<ExprId>) -> LiftResult<Option<Type>> {
        let mut null_seen = false;
        let mut acc: Option<Type> = None;
        for &input in inputs {
            if matches!(self.expr(input), Expr::Constant(Const::Null)) {
                null_seen = true;
                continue;
            }
            let Some(ty) = self.type_inner(input, visiting)? else {
                continue;
            };
            acc = Some(match acc {
                None => ty,
                Some(prev) => Self::unify(prev, ty)?,
            });
        }
        if let Some(ty) = &acc {
            if null_seen && !ty.is_reference() {
                return Err(LiftError::PhiDisagreement {
                    types: vec!["null".to_string(), ty.to_string()],
                });
            }
        } else if null_seen {
            acc = Some(Type::object());
        }
        Ok(acc)
    }

    fn unify(a: Type, b: Type) -> LiftResult<Type> {
        if a == b {
            Ok(a)
        } else if a.is_reference() && b.is_reference() {
            Ok(Type::object())
        } else {
            Err(LiftError::PhiDisagreement {
                types: vec![a.to_string(), b.to_string()],
            })
        }
    }
}
