//! Integration tests for method lifting
//!
//! Assembles decoded method bodies by hand and checks the node structure
//! the lifter produces for them.

use jade_classfile::{Instruction, InstructionView, Method, Opcode, Operand, PoolValue, SwitchTable};
use jade_ssa::{lift, BinOp, CmpOp, Const, Expr, InvokeKind, LiftError, Op};
use jade_types::{FieldRef, MethodRef, Type};

fn owner() -> Type {
    Type::reference("com/example/Subject")
}

fn method(
    descriptor: &str,
    is_static: bool,
    max_locals: u16,
    max_stack: u16,
    code: Vec<Instruction>,
) -> Method {
    Method::new(
        owner(),
        "subject",
        descriptor,
        is_static,
        max_locals,
        max_stack,
        InstructionView::new(code),
    )
    .unwrap()
}

fn plain(opcode: Opcode) -> Instruction {
    Instruction::plain(opcode)
}

#[test]
fn lifts_constant_return() {
    // iconst_3; ireturn
    let m = method(
        "()I",
        true,
        0,
        1,
        vec![plain(Opcode::Iconst3), plain(Opcode::Ireturn)],
    );
    let lifted = lift(&m).unwrap();

    assert_eq!(lifted.operations.len(), 1);
    let (index, op) = lifted.operations[0];
    assert_eq!(index, 1);
    let Op::Return { value: Some(value) } = lifted.graph.op(op) else {
        panic!("expected a typed return, got {:?}", lifted.graph.op(op));
    };
    assert_eq!(
        *lifted.graph.expr(*value),
        Expr::Constant(Const::Int(3))
    );
    assert_eq!(lifted.graph.expr_type(*value).unwrap(), Type::INT);
}

#[test]
fn lifts_argument_addition() {
    // iload_1; iload_2; iadd; ireturn on an instance (II)I method
    let m = method(
        "(II)I",
        false,
        3,
        2,
        vec![
            plain(Opcode::Iload1),
            plain(Opcode::Iload2),
            plain(Opcode::Iadd),
            plain(Opcode::Ireturn),
        ],
    );
    let lifted = lift(&m).unwrap();

    assert_eq!(lifted.arguments.len(), 3);
    assert_eq!(lifted.operations.len(), 1);
    let (_, op) = lifted.operations[0];
    let Op::Return { value: Some(value) } = lifted.graph.op(op) else {
        panic!("expected a typed return");
    };
    let Expr::Binary { op: BinOp::Add, lhs, rhs } = lifted.graph.expr(*value) else {
        panic!("expected an addition, got {:?}", lifted.graph.expr(*value));
    };
    let Expr::Argument { name, ty } = lifted.graph.expr(*lhs) else {
        panic!("expected lhs argument");
    };
    assert_eq!(name, "arg1");
    assert_eq!(*ty, Type::INT);
    let Expr::Argument { name, .. } = lifted.graph.expr(*rhs) else {
        panic!("expected rhs argument");
    };
    assert_eq!(name, "arg2");
    assert_eq!(lifted.graph.expr_type(*value).unwrap(), Type::INT);
}

#[test]
fn lifts_static_field_increment() {
    // getstatic f; iconst_1; iadd; putstatic f; return
    let field = FieldRef::new(owner(), "counter", Type::INT);
    let m = method(
        "()V",
        true,
        0,
        2,
        vec![
            Instruction::new(Opcode::Getstatic, Operand::Field(field.clone())),
            plain(Opcode::Iconst1),
            plain(Opcode::Iadd),
            Instruction::new(Opcode::Putstatic, Operand::Field(field.clone())),
            plain(Opcode::Return),
        ],
    );
    let lifted = lift(&m).unwrap();

    assert_eq!(lifted.operations.len(), 2);
    let (store_index, store) = lifted.operations[0];
    assert_eq!(store_index, 3);
    let Op::StoreField { field: f, value, object: None } = lifted.graph.op(store) else {
        panic!("expected a static field write");
    };
    assert_eq!(*f, field);
    let Expr::Binary { op: BinOp::Add, lhs, rhs } = lifted.graph.expr(*value) else {
        panic!("expected an addition");
    };
    assert!(matches!(
        lifted.graph.expr(*lhs),
        Expr::LoadField { object: None, .. }
    ));
    assert_eq!(*lifted.graph.expr(*rhs), Expr::Constant(Const::Int(1)));

    let (_, ret) = lifted.operations[1];
    assert_eq!(*lifted.graph.op(ret), Op::Return { value: None });
}

#[test]
fn lifts_iinc_into_local_rebinding() {
    // iinc 1, 5; iload_1; ireturn on an instance (I)I method
    let m = method(
        "(I)I",
        false,
        2,
        1,
        vec![
            Instruction::new(
                Opcode::Iinc,
                Operand::Increment { slot: 1, delta: 5 },
            ),
            plain(Opcode::Iload1),
            plain(Opcode::Ireturn),
        ],
    );
    let lifted = lift(&m).unwrap();

    // the increment itself emits nothing
    assert_eq!(lifted.operations.len(), 1);
    let (_, op) = lifted.operations[0];
    let Op::Return { value: Some(value) } = lifted.graph.op(op) else {
        panic!("expected a typed return");
    };
    let Expr::Binary { op: BinOp::Add, lhs, rhs } = lifted.graph.expr(*value) else {
        panic!("expected an addition");
    };
    assert!(matches!(
        lifted.graph.expr(*lhs),
        Expr::Argument { name, .. } if name == "arg1"
    ));
    assert_eq!(*lifted.graph.expr(*rhs), Expr::Constant(Const::Int(5)));
}

#[test]
fn lifts_discarded_virtual_invocation() {
    // aload_0; invokevirtual probe()I; pop; return
    let probe = MethodRef::new(owner(), "probe", Vec::new(), Type::INT);
    let m = method(
        "()V",
        false,
        1,
        1,
        vec![
            plain(Opcode::Aload0),
            Instruction::new(Opcode::Invokevirtual, Operand::Method(probe.clone())),
            plain(Opcode::Pop),
            plain(Opcode::Return),
        ],
    );
    let lifted = lift(&m).unwrap();

    assert_eq!(lifted.operations.len(), 2);
    let (call_index, call) = lifted.operations[0];
    assert_eq!(call_index, 1);
    let Op::Discard { value } = lifted.graph.op(call) else {
        panic!("expected the popped call to be recorded");
    };
    let Expr::Invoke { kind, method: m_ref, args, object: Some(receiver) } =
        lifted.graph.expr(*value)
    else {
        panic!("expected an invocation");
    };
    assert_eq!(*kind, InvokeKind::Virtual);
    assert_eq!(*m_ref, probe);
    assert!(args.is_empty());
    assert!(matches!(
        lifted.graph.expr(*receiver),
        Expr::Argument { name, .. } if name == "arg0"
    ));

    let (_, ret) = lifted.operations[1];
    assert_eq!(*lifted.graph.op(ret), Op::Return { value: None });
}

#[test]
fn lifts_array_store() {
    // aload_1; iconst_0; iconst_7 (bipush); iastore; return
    let m = method(
        "([I)V",
        false,
        2,
        3,
        vec![
            plain(Opcode::Aload1),
            plain(Opcode::Iconst0),
            Instruction::new(Opcode::Bipush, Operand::Byte(7)),
            plain(Opcode::Iastore),
            plain(Opcode::Return),
        ],
    );
    let lifted = lift(&m).unwrap();

    assert_eq!(lifted.operations.len(), 2);
    let (_, store) = lifted.operations[0];
    let Op::StoreElement { array, index, value } = lifted.graph.op(store) else {
        panic!("expected an element store");
    };
    assert!(matches!(
        lifted.graph.expr(*array),
        Expr::Argument { name, .. } if name == "arg1"
    ));
    assert_eq!(*lifted.graph.expr(*index), Expr::Constant(Const::Int(0)));
    assert_eq!(*lifted.graph.expr(*value), Expr::Constant(Const::Int(7)));
    assert_eq!(
        lifted.graph.expr_type(*array).unwrap(),
        Type::INT.make_array(1)
    );
}

#[test]
fn empty_method_lifts_to_nothing() {
    let m = method("()V", true, 0, 0, Vec::new());
    let lifted = lift(&m).unwrap();
    assert!(lifted.operations.is_empty());
    assert!(lifted.expressions_by_index.is_empty());
    assert!(lifted.effects.is_empty());
}

#[test]
fn negated_branches_wrap_exactly_one_not() {
    // iload_0; ifge 3; nop; return
    let m = method(
        "(I)V",
        true,
        1,
        1,
        vec![
            plain(Opcode::Iload0),
            Instruction::new(Opcode::Ifge, Operand::Branch(3)),
            plain(Opcode::Nop),
            plain(Opcode::Return),
        ],
    );
    let lifted = lift(&m).unwrap();

    let (_, branch) = lifted.operations[0];
    let Op::Branch { condition: Some(condition), target: 3 } = lifted.graph.op(branch) else {
        panic!("expected a conditional branch to 3");
    };
    let Expr::Not { value } = lifted.graph.expr(*condition) else {
        panic!("ifge must negate a less-than");
    };
    let Expr::Compare { op: CmpOp::Lt, lhs, rhs } = lifted.graph.expr(*value) else {
        panic!("expected a less-than comparison");
    };
    assert!(matches!(lifted.graph.expr(*lhs), Expr::Argument { .. }));
    assert_eq!(*lifted.graph.expr(*rhs), Expr::Constant(Const::Int(0)));
    assert_eq!(lifted.graph.expr_type(*condition).unwrap(), Type::BOOLEAN);
}

#[test]
fn positive_branches_carry_bare_comparisons() {
    // iload_0; iload_1; if_icmplt 4; nop; return
    let m = method(
        "(II)V",
        true,
        2,
        2,
        vec![
            plain(Opcode::Iload0),
            plain(Opcode::Iload1),
            Instruction::new(Opcode::IfIcmplt, Operand::Branch(4)),
            plain(Opcode::Nop),
            plain(Opcode::Return),
        ],
    );
    let lifted = lift(&m).unwrap();

    let (_, branch) = lifted.operations[0];
    let Op::Branch { condition: Some(condition), .. } = lifted.graph.op(branch) else {
        panic!("expected a conditional branch");
    };
    // deeper slot on the left: arg0 < arg1
    let Expr::Compare { op: CmpOp::Lt, lhs, rhs } = lifted.graph.expr(*condition) else {
        panic!("expected a bare less-than");
    };
    assert!(matches!(
        lifted.graph.expr(*lhs),
        Expr::Argument { name, .. } if name == "arg0"
    ));
    assert!(matches!(
        lifted.graph.expr(*rhs),
        Expr::Argument { name, .. } if name == "arg1"
    ));
}

#[test]
fn null_checks_compare_against_null() {
    // aload_0; ifnonnull 3; nop; return
    let m = method(
        "(Ljava/lang/Object;)V",
        true,
        1,
        1,
        vec![
            plain(Opcode::Aload0),
            Instruction::new(Opcode::Ifnonnull, Operand::Branch(3)),
            plain(Opcode::Nop),
            plain(Opcode::Return),
        ],
    );
    let lifted = lift(&m).unwrap();
    let (_, branch) = lifted.operations[0];
    let Op::Branch { condition: Some(condition), .. } = lifted.graph.op(branch) else {
        panic!("expected a conditional branch");
    };
    let Expr::Not { value } = lifted.graph.expr(*condition) else {
        panic!("ifnonnull negates an equality");
    };
    let Expr::Compare { op: CmpOp::Eq, rhs, .. } = lifted.graph.expr(*value) else {
        panic!("expected an equality");
    };
    assert_eq!(*lifted.graph.expr(*rhs), Expr::Constant(Const::Null));
}

#[test]
fn diamond_join_builds_phi_in_predecessor_order() {
    // 0: iload_0        5: iconst_2
    // 1: ifeq 5         6: istore_1
    // 2: iconst_1       7: iload_1
    // 3: istore_1       8: ireturn
    // 4: goto 7
    let m = method(
        "(I)I",
        true,
        2,
        1,
        vec![
            plain(Opcode::Iload0),
            Instruction::new(Opcode::Ifeq, Operand::Branch(5)),
            plain(Opcode::Iconst1),
            plain(Opcode::Istore1),
            Instruction::new(Opcode::Goto, Operand::Branch(7)),
            plain(Opcode::Iconst2),
            plain(Opcode::Istore1),
            plain(Opcode::Iload1),
            plain(Opcode::Ireturn),
        ],
    );
    let lifted = lift(&m).unwrap();

    let (_, ret) = *lifted.operations.last().unwrap();
    let Op::Return { value: Some(value) } = lifted.graph.op(ret) else {
        panic!("expected a typed return");
    };
    let Expr::Phi { inputs } = lifted.graph.expr(*value) else {
        panic!("expected the merged local to be a phi, got {:?}", lifted.graph.expr(*value));
    };
    // goto at 4 precedes the fallthrough at 6
    assert_eq!(inputs.len(), 2);
    assert_eq!(*lifted.graph.expr(inputs[0]), Expr::Constant(Const::Int(1)));
    assert_eq!(*lifted.graph.expr(inputs[1]), Expr::Constant(Const::Int(2)));
    assert_eq!(lifted.graph.expr_type(*value).unwrap(), Type::INT);
}

#[test]
fn diamond_join_carries_agreeing_slots_through() {
    // both paths leave arg0's binding for slot 0 untouched; only slot 1
    // disagrees, so exactly one phi appears
    let m = method(
        "(I)I",
        true,
        2,
        1,
        vec![
            plain(Opcode::Iload0),
            Instruction::new(Opcode::Ifeq, Operand::Branch(5)),
            plain(Opcode::Iconst1),
            plain(Opcode::Istore1),
            Instruction::new(Opcode::Goto, Operand::Branch(7)),
            plain(Opcode::Iconst2),
            plain(Opcode::Istore1),
            plain(Opcode::Iload0),
            plain(Opcode::Ireturn),
        ],
    );
    let lifted = lift(&m).unwrap();
    let (_, ret) = *lifted.operations.last().unwrap();
    let Op::Return { value: Some(value) } = lifted.graph.op(ret) else {
        panic!("expected a typed return");
    };
    assert!(matches!(
        lifted.graph.expr(*value),
        Expr::Argument { name, .. } if name == "arg0"
    ));
}

#[test]
fn loop_phi_receives_backward_input() {
    // 0: iconst_0       4: if_icmpge 7
    // 1: istore_1       5: iinc 1, 1
    // 2: iload_1        6: goto 2
    // 3: bipush 10      7: return
    let m = method(
        "()V",
        true,
        2,
        2,
        vec![
            plain(Opcode::Iconst0),
            plain(Opcode::Istore1),
            plain(Opcode::Iload1),
            Instruction::new(Opcode::Bipush, Operand::Byte(10)),
            Instruction::new(Opcode::IfIcmpge, Operand::Branch(7)),
            Instruction::new(
                Opcode::Iinc,
                Operand::Increment { slot: 1, delta: 1 },
            ),
            Instruction::new(Opcode::Goto, Operand::Branch(2)),
            plain(Opcode::Return),
        ],
    );
    let lifted = lift(&m).unwrap();

    // the loop-head load pushed a phi
    let head = lifted.expressions_by_index[&2];
    let Expr::Phi { inputs } = lifted.graph.expr(head) else {
        panic!("loop-carried local must be a phi, got {:?}", lifted.graph.expr(head));
    };
    assert_eq!(inputs.len(), 2);
    assert_eq!(*lifted.graph.expr(inputs[0]), Expr::Constant(Const::Int(0)));
    let Expr::Binary { op: BinOp::Add, lhs, rhs } = lifted.graph.expr(inputs[1]) else {
        panic!("backward input must be the incremented value");
    };
    assert_eq!(*lhs, head);
    assert_eq!(*lifted.graph.expr(*rhs), Expr::Constant(Const::Int(1)));
    // the cycle still types as int
    assert_eq!(lifted.graph.expr_type(head).unwrap(), Type::INT);
}

#[test]
fn constructor_pattern_records_single_call() {
    // new C; dup; invokespecial C.<init>()V; areturn
    let init = MethodRef::new(owner(), "<init>", Vec::new(), Type::Void);
    let m = method(
        "()Lcom/example/Subject;",
        true,
        0,
        2,
        vec![
            Instruction::new(Opcode::New, Operand::TypeRef(owner())),
            plain(Opcode::Dup),
            Instruction::new(Opcode::Invokespecial, Operand::Method(init)),
            plain(Opcode::Areturn),
        ],
    );
    let lifted = lift(&m).unwrap();

    assert_eq!(lifted.operations.len(), 2);
    let (call_index, call) = lifted.operations[0];
    assert_eq!(call_index, 2);
    let Op::Discard { value } = lifted.graph.op(call) else {
        panic!("void constructor call must be recorded");
    };
    let Expr::Invoke { kind: InvokeKind::Special, object: Some(receiver), .. } =
        lifted.graph.expr(*value)
    else {
        panic!("expected the constructor invocation");
    };
    let (_, ret) = lifted.operations[1];
    let Op::Return { value: Some(returned) } = lifted.graph.op(ret) else {
        panic!("expected areturn");
    };
    // dup shared the allocation between the call and the return
    assert_eq!(receiver, returned);
    assert!(matches!(
        lifted.graph.expr(*returned),
        Expr::Allocate { dims, .. } if dims.is_empty()
    ));
}

#[test]
fn multianewarray_orders_lengths_outermost_first() {
    // bipush 2; bipush 3; multianewarray [[I 2; areturn
    let m = method(
        "()[[I",
        true,
        0,
        2,
        vec![
            Instruction::new(Opcode::Bipush, Operand::Byte(2)),
            Instruction::new(Opcode::Bipush, Operand::Byte(3)),
            Instruction::new(
                Opcode::Multianewarray,
                Operand::MultiArray {
                    ty: Type::INT.make_array(2),
                    dims: 2,
                },
            ),
            plain(Opcode::Areturn),
        ],
    );
    let lifted = lift(&m).unwrap();
    let (_, ret) = lifted.operations[0];
    let Op::Return { value: Some(value) } = lifted.graph.op(ret) else {
        panic!("expected areturn");
    };
    let Expr::Allocate { ty, dims } = lifted.graph.expr(*value) else {
        panic!("expected an allocation");
    };
    assert_eq!(*ty, Type::INT.make_array(2));
    assert_eq!(dims.len(), 2);
    assert_eq!(*lifted.graph.expr(dims[0]), Expr::Constant(Const::Int(2)));
    assert_eq!(*lifted.graph.expr(dims[1]), Expr::Constant(Const::Int(3)));
}

#[test]
fn switch_pops_selector_and_keeps_table() {
    let table = SwitchTable {
        cases: vec![(0, 2), (1, 3)],
        default: 4,
    };
    let m = method(
        "(I)V",
        true,
        1,
        1,
        vec![
            plain(Opcode::Iload0),
            Instruction::new(Opcode::Lookupswitch, Operand::Switch(table.clone())),
            plain(Opcode::Return),
            plain(Opcode::Return),
            plain(Opcode::Return),
        ],
    );
    let lifted = lift(&m).unwrap();
    let (_, op) = lifted.operations[0];
    let Op::Switch { selector, table: lifted_table } = lifted.graph.op(op) else {
        panic!("expected a switch");
    };
    assert!(matches!(lifted.graph.expr(*selector), Expr::Argument { .. }));
    assert_eq!(*lifted_table, table);
}

#[test]
fn subroutines_materialize_return_addresses() {
    // 0: jsr 2; 1: return; 2: astore_0; 3: ret 0
    let m = method(
        "()V",
        true,
        1,
        1,
        vec![
            Instruction::new(Opcode::Jsr, Operand::Branch(2)),
            plain(Opcode::Return),
            plain(Opcode::Astore0),
            Instruction::new(Opcode::Ret, Operand::Slot(0)),
        ],
    );
    let lifted = lift(&m).unwrap();
    assert_eq!(lifted.operations.len(), 3);
    assert!(matches!(
        lifted.graph.op(lifted.operations[0].1),
        Op::SubroutineCall { target: 2 }
    ));
    assert!(matches!(
        lifted.graph.op(lifted.operations[1].1),
        Op::Return { value: None }
    ));
    assert!(matches!(
        lifted.graph.op(lifted.operations[2].1),
        Op::SubroutineReturn
    ));
}

#[test]
fn ldc_pushes_typed_constants() {
    let m = method(
        "()Ljava/lang/String;",
        true,
        0,
        1,
        vec![
            Instruction::new(
                Opcode::Ldc,
                Operand::Pool(PoolValue::Str("greeting".to_string())),
            ),
            plain(Opcode::Areturn),
        ],
    );
    let lifted = lift(&m).unwrap();
    let (_, ret) = lifted.operations[0];
    let Op::Return { value: Some(value) } = lifted.graph.op(ret) else {
        panic!("expected areturn");
    };
    assert_eq!(lifted.graph.expr_type(*value).unwrap(), Type::string());
}

#[test]
fn wide_constants_occupy_two_stack_slots() {
    // ldc2_w 9L with max_stack 1 must overflow
    let m = method(
        "()J",
        true,
        0,
        1,
        vec![
            Instruction::new(Opcode::Ldc2W, Operand::Pool(PoolValue::Long(9))),
            plain(Opcode::Lreturn),
        ],
    );
    assert!(matches!(
        lift(&m),
        Err(LiftError::StackOverflow { index: 0, .. })
    ));
}

#[test]
fn long_parameters_reserve_their_high_slot() {
    // static (JI)I: arg1 takes slots 0-1, arg2 takes slot 2
    let m = method(
        "(JI)I",
        true,
        3,
        1,
        vec![plain(Opcode::Iload2), plain(Opcode::Ireturn)],
    );
    let lifted = lift(&m).unwrap();
    let (_, ret) = lifted.operations[0];
    let Op::Return { value: Some(value) } = lifted.graph.op(ret) else {
        panic!("expected ireturn");
    };
    assert!(matches!(
        lifted.graph.expr(*value),
        Expr::Argument { name, .. } if name == "arg2"
    ));
}

#[test]
fn reading_a_reserved_slot_fails() {
    // static (J)J: slot 1 is the high half of arg1
    let m = method(
        "(J)J",
        true,
        2,
        2,
        vec![plain(Opcode::Iload1), plain(Opcode::Ireturn)],
    );
    assert!(matches!(
        lift(&m),
        Err(LiftError::UnboundLocal { slot: 1, index: 0 })
    ));
}

#[test]
fn popping_an_empty_stack_fails() {
    let m = method("()V", true, 0, 2, vec![plain(Opcode::Iadd)]);
    assert!(matches!(
        lift(&m),
        Err(LiftError::StackUnderflow { index: 0 })
    ));
}

#[test]
fn pop_refuses_wide_values() {
    let m = method(
        "()V",
        true,
        0,
        2,
        vec![plain(Opcode::Lconst0), plain(Opcode::Pop), plain(Opcode::Return)],
    );
    assert!(matches!(lift(&m), Err(LiftError::TypeMismatch { .. })));
}

#[test]
fn pop2_takes_one_wide_value() {
    let m = method(
        "()V",
        true,
        0,
        2,
        vec![plain(Opcode::Lconst0), plain(Opcode::Pop2), plain(Opcode::Return)],
    );
    assert!(lift(&m).is_ok());
}

#[test]
fn known_gaps_fail_loudly() {
    for opcode in [
        Opcode::Lcmp,
        Opcode::Fcmpl,
        Opcode::Dcmpg,
        Opcode::DupX1,
        Opcode::Dup2X2,
        Opcode::Ineg,
    ] {
        let m = method("()V", true, 0, 4, vec![plain(opcode)]);
        match lift(&m) {
            Err(LiftError::Unimplemented { opcode: name, index: 0 }) => {
                assert_eq!(name, opcode.mnemonic());
            }
            other => panic!("{} must be unimplemented, got {:?}", opcode, other),
        }
    }
}

#[test]
fn nonempty_stack_at_join_fails() {
    // 0: iload_0; 1: ifeq 3; 2: iconst_1 (leaves a value); 3: return
    let m = method(
        "(I)V",
        true,
        1,
        2,
        vec![
            plain(Opcode::Iload0),
            Instruction::new(Opcode::Ifeq, Operand::Branch(3)),
            plain(Opcode::Iconst1),
            plain(Opcode::Return),
        ],
    );
    assert!(matches!(
        lift(&m),
        Err(LiftError::JoinStackNonEmpty { index: 3 })
    ));
}

#[test]
fn mismatched_arithmetic_operands_fail() {
    // iconst_0; lconst_0; swap widths aside, add int to long directly
    let m = method(
        "()V",
        true,
        0,
        3,
        vec![
            plain(Opcode::Iconst0),
            plain(Opcode::Lconst0),
            plain(Opcode::Ladd),
            plain(Opcode::Return),
        ],
    );
    assert!(matches!(lift(&m), Err(LiftError::TypeMismatch { .. })));
}

#[test]
fn each_index_appears_at_most_once() {
    let field = FieldRef::new(owner(), "counter", Type::INT);
    let m = method(
        "()V",
        true,
        0,
        2,
        vec![
            Instruction::new(Opcode::Getstatic, Operand::Field(field.clone())),
            plain(Opcode::Iconst1),
            plain(Opcode::Iadd),
            Instruction::new(Opcode::Putstatic, Operand::Field(field)),
            plain(Opcode::Return),
        ],
    );
    let lifted = lift(&m).unwrap();

    let mut op_indices: Vec<usize> = lifted.operations.iter().map(|(i, _)| *i).collect();
    let before = op_indices.len();
    op_indices.dedup();
    assert_eq!(before, op_indices.len());

    let mut expr_indices: Vec<usize> = lifted.expressions.iter().map(|(i, _)| *i).collect();
    expr_indices.sort_unstable();
    let before = expr_indices.len();
    expr_indices.dedup();
    assert_eq!(before, expr_indices.len());
}

#[test]
fn distinct_pushes_make_distinct_nodes() {
    // two iconst_0 pushes must not collapse into one node
    let m = method(
        "()V",
        true,
        1,
        2,
        vec![
            plain(Opcode::Iconst0),
            plain(Opcode::Istore0),
            plain(Opcode::Iconst0),
            plain(Opcode::Istore0),
            plain(Opcode::Return),
        ],
    );
    let lifted = lift(&m).unwrap();
    let first = lifted.expressions_by_index[&0];
    let second = lifted.expressions_by_index[&2];
    assert_ne!(first, second);
    assert_eq!(lifted.graph.expr(first), lifted.graph.expr(second));
}

#[test]
fn casts_carry_their_targets() {
    let m = method(
        "(I)J",
        true,
        1,
        2,
        vec![plain(Opcode::Iload0), plain(Opcode::I2l), plain(Opcode::Lreturn)],
    );
    let lifted = lift(&m).unwrap();
    let (_, ret) = lifted.operations[0];
    let Op::Return { value: Some(value) } = lifted.graph.op(ret) else {
        panic!("expected lreturn");
    };
    let Expr::Cast { target, .. } = lifted.graph.expr(*value) else {
        panic!("expected a conversion");
    };
    assert_eq!(*target, Type::LONG);
    assert_eq!(lifted.graph.expr_type(*value).unwrap(), Type::LONG);
}

#[test]
fn instance_checks_are_boolean() {
    let m = method(
        "(Ljava/lang/Object;)I",
        true,
        1,
        1,
        vec![
            plain(Opcode::Aload0),
            Instruction::new(Opcode::Instanceof, Operand::TypeRef(Type::string())),
            plain(Opcode::Ireturn),
        ],
    );
    let lifted = lift(&m).unwrap();
    let (_, ret) = lifted.operations[0];
    let Op::Return { value: Some(value) } = lifted.graph.op(ret) else {
        panic!("expected ireturn");
    };
    assert_eq!(lifted.graph.expr_type(*value).unwrap(), Type::BOOLEAN);
}

#[test]
fn unreachable_code_is_noted_and_lifted() {
    // 0: return; 1: return  (1 is unreachable)
    let m = method("()V", true, 0, 0, vec![plain(Opcode::Return), plain(Opcode::Return)]);
    let lifted = lift(&m).unwrap();
    assert_eq!(lifted.operations.len(), 2);
    assert_eq!(
        lifted.diagnostics,
        vec![jade_ssa::LiftNote::UnreachableCode { index: 1 }]
    );
}

#[test]
fn listing_renders_every_instruction() {
    let m = method(
        "(II)I",
        false,
        3,
        2,
        vec![
            plain(Opcode::Iload1),
            plain(Opcode::Iload2),
            plain(Opcode::Iadd),
            plain(Opcode::Ireturn),
        ],
    );
    let lifted = lift(&m).unwrap();
    let listing = lifted.listing(&m);
    assert!(listing.contains("iload_1"));
    assert!(listing.contains("return (arg1 + arg2)"));
}

#[test]
fn monitors_emit_paired_operations() {
    let m = method(
        "(Ljava/lang/Object;)V",
        true,
        1,
        1,
        vec![
            plain(Opcode::Aload0),
            plain(Opcode::Monitorenter),
            plain(Opcode::Aload0),
            plain(Opcode::Monitorexit),
            plain(Opcode::Return),
        ],
    );
    let lifted = lift(&m).unwrap();
    assert!(matches!(
        lifted.graph.op(lifted.operations[0].1),
        Op::MonitorEnter { .. }
    ));
    assert!(matches!(
        lifted.graph.op(lifted.operations[1].1),
        Op::MonitorExit { .. }
    ));
}

#[test]
fn throw_pops_its_value() {
    let m = method(
        "(Ljava/lang/Object;)V",
        true,
        1,
        1,
        vec![plain(Opcode::Aload0), plain(Opcode::Athrow)],
    );
    let lifted = lift(&m).unwrap();
    let (_, op) = lifted.operations[0];
    assert!(matches!(lifted.graph.op(op), Op::Throw { .. }));
}

#[test]
fn invoke_argument_count_matches_signature() {
    let callee = MethodRef::new(
        owner(),
        "combine",
        vec![Type::INT, Type::INT, Type::INT],
        Type::INT,
    );
    let m = method(
        "()I",
        true,
        0,
        3,
        vec![
            plain(Opcode::Iconst1),
            plain(Opcode::Iconst2),
            plain(Opcode::Iconst3),
            Instruction::new(Opcode::Invokestatic, Operand::Method(callee)),
            plain(Opcode::Ireturn),
        ],
    );
    let lifted = lift(&m).unwrap();
    let (_, ret) = lifted.operations[0];
    let Op::Return { value: Some(value) } = lifted.graph.op(ret) else {
        panic!("expected ireturn");
    };
    let Expr::Invoke { args, object: None, .. } = lifted.graph.expr(*value) else {
        panic!("expected the static invocation");
    };
    assert_eq!(args.len(), 3);
    // last popped is the first argument
    assert_eq!(*lifted.graph.expr(args[0]), Expr::Constant(Const::Int(1)));
    assert_eq!(*lifted.graph.expr(args[2]), Expr::Constant(Const::Int(3)));
}

fn branch_shapes() -> Vec<(Opcode, CmpOp, bool, bool)> {
    // opcode, comparator, negated, binary
    vec![
        (Opcode::Ifeq, CmpOp::Eq, false, false),
        (Opcode::Ifne, CmpOp::Eq, true, false),
        (Opcode::Iflt, CmpOp::Lt, false, false),
        (Opcode::Ifge, CmpOp::Lt, true, false),
        (Opcode::Ifgt, CmpOp::Gt, false, false),
        (Opcode::Ifle, CmpOp::Gt, true, false),
        (Opcode::IfIcmpeq, CmpOp::Eq, false, true),
        (Opcode::IfIcmpne, CmpOp::Eq, true, true),
        (Opcode::IfIcmplt, CmpOp::Lt, false, true),
        (Opcode::IfIcmpge, CmpOp::Lt, true, true),
        (Opcode::IfIcmpgt, CmpOp::Gt, false, true),
        (Opcode::IfIcmple, CmpOp::Gt, true, true),
    ]
}

#[test]
fn conditional_branch_table_holds() {
    for (opcode, cmp, negated, binary) in branch_shapes() {
        let mut code = vec![plain(Opcode::Iload0)];
        if binary {
            code.push(plain(Opcode::Iload1));
        }
        let target = code.len() + 2;
        code.push(Instruction::new(opcode, Operand::Branch(target)));
        code.push(plain(Opcode::Nop));
        code.push(plain(Opcode::Return));
        let m = method("(II)V", true, 2, 2, code);
        let lifted = lift(&m).unwrap();

        let (_, branch) = lifted.operations[0];
        let Op::Branch { condition: Some(mut condition), .. } = lifted.graph.op(branch).clone()
        else {
            panic!("{}: expected a conditional branch", opcode);
        };
        if negated {
            let Expr::Not { value } = lifted.graph.expr(condition) else {
                panic!("{}: expected exactly one negation", opcode);
            };
            condition = *value;
        }
        let Expr::Compare { op, .. } = lifted.graph.expr(condition) else {
            panic!("{}: expected a comparison, got {:?}", opcode, lifted.graph.expr(condition));
        };
        assert_eq!(*op, cmp, "{}", opcode);
        // a negated form wraps exactly one not; the inner node is bare
        assert!(!matches!(lifted.graph.expr(condition), Expr::Not { .. }));
    }
}
