//! The abstract interpreter
//!
//! Walks a method's instruction view in source order, simulating the
//! local-variable array and the operand stack with expression
//! references. Every instruction contributes at most one node: an
//! expression pushed on the simulated stack or an operation appended to
//! the emitted sequence. Join points reconcile locals with phi nodes.

mod frame;
mod join;

use crate::error::{LiftError, LiftNote, LiftResult};
use crate::ir::{BinOp, CmpOp, Const, Expr, ExprId, InvokeKind, IrGraph, Op, OpId};
use frame::{Frame, LocalSlot};
use jade_classfile::{Method, Opcode, Operand, PoolValue};
use jade_types::Type;
use rustc_hash::{FxHashMap, FxHashSet};

/// What one source instruction contributed to the lift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsnEffect {
    /// Pushed this expression on the simulated stack
    Pushed(ExprId),
    /// Emitted this operation
    Emitted(OpId),
    /// Only rearranged the stack or the locals
    StackOnly,
    /// Contributed nothing
    NoOp,
}

/// The result of lifting one method
#[derive(Debug, Clone)]
pub struct LiftedMethod {
    /// The node arena every id below points into
    pub graph: IrGraph,
    /// Argument expressions in declaration order, receiver first for
    /// instance methods
    pub arguments: Vec<ExprId>,
    /// Emitted operations as `(source instruction index, op)` pairs, in
    /// source order
    pub operations: Vec<(usize, OpId)>,
    /// Pushed expressions as `(source instruction index, expr)` pairs,
    /// in the order they were recorded
    pub expressions: Vec<(usize, ExprId)>,
    /// Pushed expression per source instruction index
    pub expressions_by_index: FxHashMap<usize, ExprId>,
    /// Per-instruction contribution, indexed by instruction
    pub effects: Vec<InsnEffect>,
    /// Non-fatal notes gathered along the way
    pub diagnostics: Vec<LiftNote>,
}

/// Lift one decoded method into SSA form
pub fn lift(method: &Method) -> LiftResult<LiftedMethod> {
    Lifter::new(method)?.run()
}

/// The per-method lift state
///
/// Created fresh for each method; there is no shared state between
/// lifts, so distinct methods may be lifted in parallel by callers.
pub struct Lifter<'a> {
    method: &'a Method,
    graph: IrGraph,
    frame: Frame,
    flow: join::FlowInfo,
    arguments: Vec<ExprId>,
    operations: Vec<(usize, OpId)>,
    expressions: Vec<(usize, ExprId)>,
    expressions_by_index: FxHashMap<usize, ExprId>,
    effects: Vec<InsnEffect>,
    diagnostics: Vec<LiftNote>,
    /// Locals and stack as they were when a branching instruction
    /// executed, keyed by its index.
    edge_envs: FxHashMap<usize, (Vec<LocalSlot>, Vec<(ExprId, usize)>)>,
    /// Phis created at joins that still await backward inputs.
    join_phis: FxHashMap<usize, Vec<(u16, ExprId)>>,
    /// Origin instruction of each pushed expression.
    expr_sources: FxHashMap<ExprId, usize>,
    /// Invocations already recorded as discarded.
    discarded: FxHashSet<ExprId>,
}

impl<'a> Lifter<'a> {
    /// Prepare a lift: seed the argument bindings into the local array.
    ///
    /// Arguments are installed from slot 0 upward; an instance method's
    /// receiver takes slot 0 as `arg0`. Wide arguments occupy two slots
    /// with only the low slot holding the reference.
    pub fn new(method: &'a Method) -> LiftResult<Self> {
        let flow = join::analyze(&method.code);
        let mut graph = IrGraph::new();
        let mut frame = Frame::new(method.max_locals, method.max_stack);
        let mut arguments = Vec::new();

        let mut slot: u16 = 0;
        let mut param = 0usize;
        if !method.is_static {
            let receiver = graph.add_expr(Expr::Argument {
                name: "arg0".to_string(),
                ty: method.owner.clone(),
            });
            frame.set_local(slot, receiver, false, 0)?;
            arguments.push(receiver);
            slot += 1;
            param = 1;
        }
        for ty in &method.args {
            let wide = ty.is_wide();
            let arg = graph.add_expr(Expr::Argument {
                name: format!("arg{}", param),
                ty: ty.clone(),
            });
            frame.set_local(slot, arg, wide, 0)?;
            arguments.push(arg);
            slot += if wide { 2 } else { 1 };
            param += 1;
        }

        let n = method.code.len();
        Ok(Self {
            method,
            graph,
            frame,
            flow,
            arguments,
            operations: Vec::new(),
            expressions: Vec::new(),
            expressions_by_index: FxHashMap::default(),
            effects: vec![InsnEffect::NoOp; n],
            diagnostics: Vec::new(),
            edge_envs: FxHashMap::default(),
            join_phis: FxHashMap::default(),
            expr_sources: FxHashMap::default(),
            discarded: FxHashSet::default(),
        })
    }

    /// Run the walk and produce the lifted method
    pub fn run(mut self) -> LiftResult<LiftedMethod> {
        let n = self.method.code.len();
        for i in 0..n {
            self.enter(i)?;
            self.dispatch(i)?;
            self.record_edges(i)?;
        }
        Ok(LiftedMethod {
            graph: self.graph,
            arguments: self.arguments,
            operations: self.operations,
            expressions: self.expressions,
            expressions_by_index: self.expressions_by_index,
            effects: self.effects,
            diagnostics: self.diagnostics,
        })
    }

    // ===== Walk bookkeeping =====

    /// Reconcile the environment before lifting instruction `i`.
    fn enter(&mut self, i: usize) -> LiftResult<()> {
        let preds = self.flow.preds[i].clone();
        // the method entry is an implicit predecessor of instruction 0
        let in_degree = preds.len() + usize::from(i == 0 && !preds.is_empty());

        if in_degree >= 2 {
            self.resolve_join(i, &preds)?;
        } else if preds.len() == 1 {
            let p = preds[0];
            let fallthrough = p + 1 == i && self.method.code.opcode(p).falls_through();
            if p < i && !fallthrough {
                // a branch is the only way in; its environment applies
                if let Some((locals, stack)) = self.edge_envs.get(&p) {
                    self.frame.restore(locals.clone(), stack.clone());
                }
            }
        } else if preds.is_empty()
            && i > 0
            && !self.method.code.opcode(i - 1).falls_through()
        {
            self.diagnostics.push(LiftNote::UnreachableCode { index: i });
        }

        if self.flow.jsr_target[i] {
            // the value the subroutine-jump pushed for this entry
            let address = self.graph.add_expr(Expr::RetAddr { target: i });
            self.frame.push(address, 1, i)?;
        }
        Ok(())
    }

    /// Merge the incoming local maps at a join point.
    ///
    /// Forward predecessors contribute their recorded environments; a
    /// join with a predecessor that has not been lifted yet gets a phi
    /// per occupied slot, completed when the backward branch is reached.
    fn resolve_join(&mut self, i: usize, preds: &[usize]) -> LiftResult<()> {
        let mut known: Vec<Vec<LocalSlot>> = Vec::new();
        let mut pending = false;

        if i == 0 {
            // entry environment: the seeded arguments
            known.push(self.frame.locals().to_vec());
        }
        for &p in preds {
            if p + 1 == i && self.method.code.opcode(p).falls_through() {
                if !self.frame.stack_is_empty() {
                    return Err(LiftError::JoinStackNonEmpty { index: i });
                }
                known.push(self.frame.locals().to_vec());
            } else if p < i {
                if let Some((locals, stack)) = self.edge_envs.get(&p) {
                    if !stack.is_empty() {
                        return Err(LiftError::JoinStackNonEmpty { index: i });
                    }
                    known.push(locals.clone());
                } else {
                    pending = true;
                }
            } else {
                pending = true;
            }
        }

        let max_locals = self.frame.locals().len();
        let mut merged = vec![LocalSlot::Empty; max_locals];
        let mut phis: Vec<(u16, ExprId)> = Vec::new();

        for s in 0..max_locals {
            let mut values: Vec<ExprId> = Vec::new();
            let mut all_reserved = !known.is_empty();
            for locals in &known {
                match locals[s] {
                    LocalSlot::Value(e) => {
                        values.push(e);
                        all_reserved = false;
                    }
                    LocalSlot::Reserved => {}
                    LocalSlot::Empty => {
                        all_reserved = false;
                    }
                }
            }
            if all_reserved {
                merged[s] = LocalSlot::Reserved;
            } else if values.is_empty() {
                // unreferenced slots stay unreferenced
            } else if !pending
                && values.len() == known.len()
                && values.iter().all(|v| *v == values[0])
            {
                merged[s] = LocalSlot::Value(values[0]);
            } else {
                let phi = self.graph.add_expr(Expr::Phi { inputs: values });
                phis.push((s as u16, phi));
                merged[s] = LocalSlot::Value(phi);
            }
        }

        self.frame.restore(merged, Vec::new());
        if pending {
            self.join_phis.insert(i, phis);
        }
        Ok(())
    }

    /// Snapshot the environment at a branching instruction and feed the
    /// pending phis of any backward target.
    fn record_edges(&mut self, i: usize) -> LiftResult<()> {
        let mut targets: Vec<usize> = Vec::new();
        match self.method.code.operand(i) {
            Operand::Branch(target) => targets.push(*target),
            Operand::Switch(table) => {
                targets.push(table.default);
                targets.extend(table.cases.iter().map(|(_, t)| *t));
            }
            _ => return Ok(()),
        }
        targets.sort_unstable();
        targets.dedup();

        self.edge_envs.insert(
            i,
            (
                self.frame.locals().to_vec(),
                self.frame.stack_entries().to_vec(),
            ),
        );

        for target in targets {
            if target > i {
                continue;
            }
            if self.join_phis.contains_key(&target) && !self.frame.stack_is_empty() {
                return Err(LiftError::JoinStackNonEmpty { index: i });
            }
            if let Some(phis) = self.join_phis.get(&target).cloned() {
                for (slot, phi) in phis {
                    if let LocalSlot::Value(e) = self.frame.locals()[slot as usize] {
                        self.graph.add_phi_input(phi, e);
                    }
                }
            }
        }
        Ok(())
    }

    // ===== Node construction helpers =====

    fn push_expr(&mut self, i: usize, expr: Expr) -> LiftResult<ExprId> {
        let id = self.graph.add_expr(expr);
        self.push_existing(i, id)?;
        Ok(id)
    }

    fn push_existing(&mut self, i: usize, id: ExprId) -> LiftResult<()> {
        let width = self.graph.expr_width(id)?;
        self.frame.push(id, width, i)?;
        self.expressions.push((i, id));
        self.expressions_by_index.insert(i, id);
        self.expr_sources.entry(id).or_insert(i);
        self.effects[i] = InsnEffect::Pushed(id);
        Ok(())
    }

    fn emit(&mut self, i: usize, op: Op) -> OpId {
        let id = self.graph.add_op(op);
        self.operations.push((i, id));
        self.effects[i] = InsnEffect::Emitted(id);
        id
    }

    fn pop(&mut self, i: usize) -> LiftResult<ExprId> {
        Ok(self.frame.pop(i)?.0)
    }

    /// Record a popped-and-dropped invocation as an emitted operation.
    ///
    /// The operation is keyed by the invocation's own source index, and
    /// a value duplicated then dropped twice records the single call
    /// once.
    fn discard_if_call(&mut self, at: usize, value: ExprId) {
        if matches!(self.graph.expr(value), Expr::Invoke { .. }) && self.discarded.insert(value) {
            let source = self.expr_sources.get(&value).copied().unwrap_or(at);
            let op = self.graph.add_op(Op::Discard { value });
            self.operations.push((source, op));
        }
    }

    fn slot_operand(&self, i: usize) -> LiftResult<u16> {
        match self.method.code.operand(i) {
            Operand::Slot(slot) => Ok(*slot),
            other => Err(self.bad_operand(i, other)),
        }
    }

    fn branch_operand(&self, i: usize) -> LiftResult<usize> {
        match self.method.code.operand(i) {
            Operand::Branch(target) => Ok(*target),
            other => Err(self.bad_operand(i, other)),
        }
    }

    fn type_operand(&self, i: usize) -> LiftResult<Type> {
        match self.method.code.operand(i) {
            Operand::TypeRef(ty) => Ok(ty.clone()),
            other => Err(self.bad_operand(i, other)),
        }
    }

    fn bad_operand(&self, i: usize, operand: &Operand) -> LiftError {
        LiftError::Internal {
            message: format!(
                "instruction {} ({}) carries unexpected operand {:?}",
                i,
                self.method.code.opcode(i),
                operand
            ),
        }
    }

    fn int_const(&mut self, i: usize, value: i32) -> LiftResult<()> {
        self.push_expr(i, Expr::Constant(Const::Int(value)))?;
        Ok(())
    }

    fn cast(&mut self, i: usize, target: Type) -> LiftResult<()> {
        let value = self.pop(i)?;
        self.push_expr(i, Expr::Cast { value, target })?;
        Ok(())
    }

    /// Pop right then left; the deeper slot is the left operand.
    fn binary(&mut self, i: usize, op: BinOp) -> LiftResult<()> {
        let rhs = self.pop(i)?;
        let lhs = self.pop(i)?;
        self.push_expr(i, Expr::Binary { op, lhs, rhs })?;
        Ok(())
    }

    /// Unary comparison branch against zero or null.
    fn branch_unary(&mut self, i: usize, op: CmpOp, against: Const, negate: bool) -> LiftResult<()> {
        let target = self.branch_operand(i)?;
        let lhs = self.pop(i)?;
        let rhs = self.graph.add_expr(Expr::Constant(against));
        self.branch_with(i, op, lhs, rhs, negate, target)
    }

    /// Binary comparison branch between two popped values.
    fn branch_binary(&mut self, i: usize, op: CmpOp, negate: bool) -> LiftResult<()> {
        let target = self.branch_operand(i)?;
        let rhs = self.pop(i)?;
        let lhs = self.pop(i)?;
        self.branch_with(i, op, lhs, rhs, negate, target)
    }

    fn branch_with(
        &mut self,
        i: usize,
        op: CmpOp,
        lhs: ExprId,
        rhs: ExprId,
        negate: bool,
        target: usize,
    ) -> LiftResult<()> {
        let compare = self.graph.add_expr(Expr::Compare { op, lhs, rhs });
        let condition = if negate {
            self.graph.add_expr(Expr::Not { value: compare })
        } else {
            compare
        };
        self.emit(
            i,
            Op::Branch {
                condition: Some(condition),
                target,
            },
        );
        Ok(())
    }

    fn invoke(&mut self, i: usize, kind: InvokeKind) -> LiftResult<()> {
        let method = match self.method.code.operand(i) {
            Operand::Method(m) => m.clone(),
            other => return Err(self.bad_operand(i, other)),
        };
        let mut args = Vec::with_capacity(method.args.len());
        for _ in 0..method.args.len() {
            args.push(self.pop(i)?);
        }
        args.reverse();
        let object = if matches!(kind, InvokeKind::Static) {
            None
        } else {
            Some(self.pop(i)?)
        };
        let is_void = method.ret == Type::Void;
        let expr = Expr::Invoke {
            kind,
            method,
            args,
            object,
        };
        if is_void {
            let value = self.graph.add_expr(expr);
            self.expr_sources.entry(value).or_insert(i);
            self.emit(i, Op::Discard { value });
        } else {
            self.push_expr(i, expr)?;
        }
        Ok(())
    }

    // ===== Opcode dispatch =====

    fn dispatch(&mut self, i: usize) -> LiftResult<()> {
        use Opcode::*;
        let opcode = self.method.code.opcode(i);
        match opcode {
            Nop => {}

            // Constants
            AconstNull => {
                self.push_expr(i, Expr::Constant(Const::Null))?;
            }
            IconstM1 => self.int_const(i, -1)?,
            Iconst0 => self.int_const(i, 0)?,
            Iconst1 => self.int_const(i, 1)?,
            Iconst2 => self.int_const(i, 2)?,
            Iconst3 => self.int_const(i, 3)?,
            Iconst4 => self.int_const(i, 4)?,
            Iconst5 => self.int_const(i, 5)?,
            Lconst0 => {
                self.push_expr(i, Expr::Constant(Const::Long(0)))?;
            }
            Lconst1 => {
                self.push_expr(i, Expr::Constant(Const::Long(1)))?;
            }
            Fconst0 => {
                self.push_expr(i, Expr::Constant(Const::Float(0.0)))?;
            }
            Fconst1 => {
                self.push_expr(i, Expr::Constant(Const::Float(1.0)))?;
            }
            Fconst2 => {
                self.push_expr(i, Expr::Constant(Const::Float(2.0)))?;
            }
            Dconst0 => {
                self.push_expr(i, Expr::Constant(Const::Double(0.0)))?;
            }
            Dconst1 => {
                self.push_expr(i, Expr::Constant(Const::Double(1.0)))?;
            }
            Bipush => {
                let value = match self.method.code.operand(i) {
                    Operand::Byte(b) => *b as i32,
                    other => return Err(self.bad_operand(i, other)),
                };
                self.int_const(i, value)?;
            }
            Sipush => {
                let value = match self.method.code.operand(i) {
                    Operand::Short(s) => *s as i32,
                    other => return Err(self.bad_operand(i, other)),
                };
                self.int_const(i, value)?;
            }
            Ldc | LdcW | Ldc2W => {
                let constant = match self.method.code.operand(i) {
                    Operand::Pool(PoolValue::Int(v)) => Const::Int(*v),
                    Operand::Pool(PoolValue::Long(v)) => Const::Long(*v),
                    Operand::Pool(PoolValue::Float(v)) => Const::Float(*v),
                    Operand::Pool(PoolValue::Double(v)) => Const::Double(*v),
                    Operand::Pool(PoolValue::Str(s)) => Const::Str(s.clone()),
                    Operand::Pool(PoolValue::Class(ty)) => Const::Class(ty.clone()),
                    other => return Err(self.bad_operand(i, other)),
                };
                self.push_expr(i, Expr::Constant(constant))?;
            }

            // Local loads: push the bound expression, no new node
            Iload | Lload | Fload | Dload | Aload | Iload0 | Iload1 | Iload2 | Iload3 | Lload0
            | Lload1 | Lload2 | Lload3 | Fload0 | Fload1 | Fload2 | Fload3 | Dload0 | Dload1
            | Dload2 | Dload3 | Aload0 | Aload1 | Aload2 | Aload3 => {
                let slot = self.slot_operand(i)?;
                let value = self.frame.local(slot, i)?;
                self.push_existing(i, value)?;
            }

            // Local stores: bind the popped expression, emit nothing
            Istore | Lstore | Fstore | Dstore | Astore | Istore0 | Istore1 | Istore2 | Istore3
            | Lstore0 | Lstore1 | Lstore2 | Lstore3 | Fstore0 | Fstore1 | Fstore2 | Fstore3
            | Dstore0 | Dstore1 | Dstore2 | Dstore3 | Astore0 | Astore1 | Astore2 | Astore3 => {
                let slot = self.slot_operand(i)?;
                let (value, width) = self.frame.pop(i)?;
                self.frame.set_local(slot, value, width == 2, i)?;
                self.effects[i] = InsnEffect::StackOnly;
            }

            Iinc => {
                let (slot, delta) = match self.method.code.operand(i) {
                    Operand::Increment { slot, delta } => (*slot, *delta),
                    other => return Err(self.bad_operand(i, other)),
                };
                let current = self.frame.local(slot, i)?;
                let amount = self.graph.add_expr(Expr::Constant(Const::Int(delta as i32)));
                let sum = self.graph.add_expr(Expr::Binary {
                    op: BinOp::Add,
                    lhs: current,
                    rhs: amount,
                });
                self.frame.set_local(slot, sum, false, i)?;
                self.effects[i] = InsnEffect::StackOnly;
            }

            // Array loads: pop index then array
            Iaload | Laload | Faload | Daload | Aaload | Baload | Caload | Saload => {
                let index = self.pop(i)?;
                let array = self.pop(i)?;
                self.push_expr(i, Expr::LoadElement { array, index })?;
            }

            // Array stores: pop value, index, array
            Iastore | Lastore | Fastore | Dastore | Aastore | Bastore | Castore | Sastore => {
                let value = self.pop(i)?;
                let index = self.pop(i)?;
                let array = self.pop(i)?;
                self.emit(
                    i,
                    Op::StoreElement {
                        array,
                        index,
                        value,
                    },
                );
            }

            // Stack manipulation, one case per opcode
            Pop => {
                let (value, width) = self.frame.pop(i)?;
                if width == 2 {
                    return Err(self.width_mismatch("pop"));
                }
                self.discard_if_call(i, value);
                self.effects[i] = InsnEffect::StackOnly;
            }
            Pop2 => {
                let (top, width) = self.frame.pop(i)?;
                if width == 2 {
                    self.discard_if_call(i, top);
                } else {
                    let (under, under_width) = self.frame.pop(i)?;
                    if under_width == 2 {
                        return Err(self.width_mismatch("pop2"));
                    }
                    self.discard_if_call(i, under);
                    self.discard_if_call(i, top);
                }
                self.effects[i] = InsnEffect::StackOnly;
            }
            Dup => {
                let (value, width) = self.frame.pop(i)?;
                if width == 2 {
                    return Err(self.width_mismatch("dup"));
                }
                self.frame.push(value, 1, i)?;
                self.frame.push(value, 1, i)?;
                self.effects[i] = InsnEffect::StackOnly;
            }
            Dup2 => {
                let (top, width) = self.frame.pop(i)?;
                if width == 2 {
                    self.frame.push(top, 2, i)?;
                    self.frame.push(top, 2, i)?;
                } else {
                    let (under, under_width) = self.frame.pop(i)?;
                    if under_width == 2 {
                        return Err(self.width_mismatch("dup2"));
                    }
                    self.frame.push(under, 1, i)?;
                    self.frame.push(top, 1, i)?;
                    self.frame.push(under, 1, i)?;
                    self.frame.push(top, 1, i)?;
                }
                self.effects[i] = InsnEffect::StackOnly;
            }
            Swap => {
                let (top, top_width) = self.frame.pop(i)?;
                let (under, under_width) = self.frame.pop(i)?;
                if top_width == 2 || under_width == 2 {
                    return Err(self.width_mismatch("swap"));
                }
                self.frame.push(top, 1, i)?;
                self.frame.push(under, 1, i)?;
                self.effects[i] = InsnEffect::StackOnly;
            }

            // Arithmetic; the deeper slot is the left operand
            Iadd | Ladd | Fadd | Dadd => self.binary(i, BinOp::Add)?,
            Isub | Lsub | Fsub | Dsub => self.binary(i, BinOp::Sub)?,
            Imul | Lmul | Fmul | Dmul => self.binary(i, BinOp::Mul)?,
            Idiv | Ldiv | Fdiv | Ddiv => self.binary(i, BinOp::Div)?,
            Irem | Lrem | Frem | Drem => self.binary(i, BinOp::Rem)?,
            Ishl | Lshl => self.binary(i, BinOp::Shl)?,
            Ishr | Lshr => self.binary(i, BinOp::Shr)?,
            Iushr | Lushr => self.binary(i, BinOp::Ushr)?,
            Iand | Land => self.binary(i, BinOp::And)?,
            Ior | Lor => self.binary(i, BinOp::Or)?,
            Ixor | Lxor => self.binary(i, BinOp::Xor)?,

            // Conversions
            I2l | F2l | D2l => self.cast(i, Type::LONG)?,
            I2f | L2f | D2f => self.cast(i, Type::FLOAT)?,
            I2d | L2d | F2d => self.cast(i, Type::DOUBLE)?,
            L2i | F2i | D2i => self.cast(i, Type::INT)?,
            I2b => self.cast(i, Type::BYTE)?,
            I2c => self.cast(i, Type::CHAR)?,
            I2s => self.cast(i, Type::SHORT)?,
            Checkcast => {
                let target = self.type_operand(i)?;
                self.cast(i, target)?;
            }

            // Conditional branches
            Ifeq => self.branch_unary(i, CmpOp::Eq, Const::Int(0), false)?,
            Ifne => self.branch_unary(i, CmpOp::Eq, Const::Int(0), true)?,
            Iflt => self.branch_unary(i, CmpOp::Lt, Const::Int(0), false)?,
            Ifge => self.branch_unary(i, CmpOp::Lt, Const::Int(0), true)?,
            Ifgt => self.branch_unary(i, CmpOp::Gt, Const::Int(0), false)?,
            Ifle => self.branch_unary(i, CmpOp::Gt, Const::Int(0), true)?,
            Ifnull => self.branch_unary(i, CmpOp::Eq, Const::Null, false)?,
            Ifnonnull => self.branch_unary(i, CmpOp::Eq, Const::Null, true)?,
            IfIcmpeq | IfAcmpeq => self.branch_binary(i, CmpOp::Eq, false)?,
            IfIcmpne | IfAcmpne => self.branch_binary(i, CmpOp::Eq, true)?,
            IfIcmplt => self.branch_binary(i, CmpOp::Lt, false)?,
            IfIcmpge => self.branch_binary(i, CmpOp::Lt, true)?,
            IfIcmpgt => self.branch_binary(i, CmpOp::Gt, false)?,
            IfIcmple => self.branch_binary(i, CmpOp::Gt, true)?,

            // Unconditional control flow
            Goto | GotoW => {
                let target = self.branch_operand(i)?;
                self.emit(
                    i,
                    Op::Branch {
                        condition: None,
                        target,
                    },
                );
            }
            Jsr | JsrW => {
                let target = self.branch_operand(i)?;
                self.emit(i, Op::SubroutineCall { target });
            }
            Ret => {
                self.emit(i, Op::SubroutineReturn);
            }

            // Returns
            Return => {
                self.emit(i, Op::Return { value: None });
            }
            Ireturn | Lreturn | Freturn | Dreturn | Areturn => {
                let value = self.pop(i)?;
                self.emit(i, Op::Return { value: Some(value) });
            }

            // Field access
            Getstatic | Getfield => {
                let field = match self.method.code.operand(i) {
                    Operand::Field(f) => f.clone(),
                    other => return Err(self.bad_operand(i, other)),
                };
                let object = if opcode == Getfield {
                    Some(self.pop(i)?)
                } else {
                    None
                };
                self.push_expr(i, Expr::LoadField { field, object })?;
            }
            Putstatic | Putfield => {
                let field = match self.method.code.operand(i) {
                    Operand::Field(f) => f.clone(),
                    other => return Err(self.bad_operand(i, other)),
                };
                let value = self.pop(i)?;
                let object = if opcode == Putfield {
                    Some(self.pop(i)?)
                } else {
                    None
                };
                self.emit(
                    i,
                    Op::StoreField {
                        field,
                        value,
                        object,
                    },
                );
            }

            // Invocation
            Invokestatic => self.invoke(i, InvokeKind::Static)?,
            Invokevirtual => self.invoke(i, InvokeKind::Virtual)?,
            Invokeinterface => self.invoke(i, InvokeKind::Interface)?,
            Invokespecial => self.invoke(i, InvokeKind::Special)?,

            // Allocation
            New => {
                let ty = self.type_operand(i)?;
                self.push_expr(i, Expr::Allocate { ty, dims: Vec::new() })?;
            }
            Newarray | Anewarray => {
                let element = self.type_operand(i)?;
                let length = self.pop(i)?;
                self.push_expr(
                    i,
                    Expr::Allocate {
                        ty: element.make_array(1),
                        dims: vec![length],
                    },
                )?;
            }
            Multianewarray => {
                let (ty, dims) = match self.method.code.operand(i) {
                    Operand::MultiArray { ty, dims } => (ty.clone(), *dims),
                    other => return Err(self.bad_operand(i, other)),
                };
                let mut lengths = Vec::with_capacity(dims as usize);
                for _ in 0..dims {
                    lengths.push(self.pop(i)?);
                }
                lengths.reverse();
                self.push_expr(i, Expr::Allocate { ty, dims: lengths })?;
            }
            Arraylength => {
                let array = self.pop(i)?;
                self.push_expr(i, Expr::ArrayLen { array })?;
            }

            // Runtime type probing
            Instanceof => {
                let probe = self.type_operand(i)?;
                let value = self.pop(i)?;
                self.push_expr(i, Expr::InstanceOf { value, probe })?;
            }

            Athrow => {
                let value = self.pop(i)?;
                self.emit(i, Op::Throw { value });
            }

            Tableswitch | Lookupswitch => {
                let table = match self.method.code.operand(i) {
                    Operand::Switch(table) => table.clone(),
                    other => return Err(self.bad_operand(i, other)),
                };
                let selector = self.pop(i)?;
                self.emit(i, Op::Switch { selector, table });
            }

            Monitorenter => {
                let value = self.pop(i)?;
                self.emit(i, Op::MonitorEnter { value });
            }
            Monitorexit => {
                let value = self.pop(i)?;
                self.emit(i, Op::MonitorExit { value });
            }

            // Known gaps; these must fail loudly rather than guess
            Lcmp | Fcmpl | Fcmpg | Dcmpl | Dcmpg | DupX1 | DupX2 | Dup2X1 | Dup2X2 | Ineg
            | Lneg | Fneg | Dneg | Wide => {
                return Err(LiftError::Unimplemented {
                    opcode: opcode.mnemonic(),
                    index: i,
                })
            }
        }
        Ok(())
    }

    fn width_mismatch(&self, op: &str) -> LiftError {
        LiftError::TypeMismatch {
            op: op.to_string(),
            expected: "category-1 value".to_string(),
            actual: "category-2 value".to_string(),
        }
    }
}
