//! JVM opcodes
//!
//! The complete instruction set of the source machine, one variant per
//! opcode byte. The discriminants are the real classfile opcode values,
//! so `Opcode::Iadd as u8` is the byte that appears in a Code attribute.

/// JVM opcode enumeration
///
/// Opcodes are grouped the way the instruction set lays them out:
/// - 0x00-0x14: constants
/// - 0x15-0x35: local and array loads
/// - 0x36-0x56: local and array stores
/// - 0x57-0x5F: stack manipulation
/// - 0x60-0x84: arithmetic
/// - 0x85-0x93: conversions
/// - 0x94-0x98: comparisons
/// - 0x99-0xB1: control flow
/// - 0xB2-0xC9: references, allocation, monitors and wide forms
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Opcode {
    // ===== Constants (0x00-0x14) =====
    Nop = 0x00,
    AconstNull = 0x01,
    IconstM1 = 0x02,
    Iconst0 = 0x03,
    Iconst1 = 0x04,
    Iconst2 = 0x05,
    Iconst3 = 0x06,
    Iconst4 = 0x07,
    Iconst5 = 0x08,
    Lconst0 = 0x09,
    Lconst1 = 0x0A,
    Fconst0 = 0x0B,
    Fconst1 = 0x0C,
    Fconst2 = 0x0D,
    Dconst0 = 0x0E,
    Dconst1 = 0x0F,
    Bipush = 0x10,
    Sipush = 0x11,
    Ldc = 0x12,
    LdcW = 0x13,
    Ldc2W = 0x14,

    // ===== Loads (0x15-0x35) =====
    Iload = 0x15,
    Lload = 0x16,
    Fload = 0x17,
    Dload = 0x18,
    Aload = 0x19,
    Iload0 = 0x1A,
    Iload1 = 0x1B,
    Iload2 = 0x1C,
    Iload3 = 0x1D,
    Lload0 = 0x1E,
    Lload1 = 0x1F,
    Lload2 = 0x20,
    Lload3 = 0x21,
    Fload0 = 0x22,
    Fload1 = 0x23,
    Fload2 = 0x24,
    Fload3 = 0x25,
    Dload0 = 0x26,
    Dload1 = 0x27,
    Dload2 = 0x28,
    Dload3 = 0x29,
    Aload0 = 0x2A,
    Aload1 = 0x2B,
    Aload2 = 0x2C,
    Aload3 = 0x2D,
    Iaload = 0x2E,
    Laload = 0x2F,
    Faload = 0x30,
    Daload = 0x31,
    Aaload = 0x32,
    Baload = 0x33,
    Caload = 0x34,
    Saload = 0x35,

    // ===== Stores (0x36-0x56) =====
    Istore = 0x36,
    Lstore = 0x37,
    Fstore = 0x38,
    Dstore = 0x39,
    Astore = 0x3A,
    Istore0 = 0x3B,
    Istore1 = 0x3C,
    Istore2 = 0x3D,
    Istore3 = 0x3E,
    Lstore0 = 0x3F,
    Lstore1 = 0x40,
    Lstore2 = 0x41,
    Lstore3 = 0x42,
    Fstore0 = 0x43,
    Fstore1 = 0x44,
    Fstore2 = 0x45,
    Fstore3 = 0x46,
    Dstore0 = 0x47,
    Dstore1 = 0x48,
    Dstore2 = 0x49,
    Dstore3 = 0x4A,
    Astore0 = 0x4B,
    Astore1 = 0x4C,
    Astore2 = 0x4D,
    Astore3 = 0x4E,
    Iastore = 0x4F,
    Lastore = 0x50,
    Fastore = 0x51,
    Dastore = 0x52,
    Aastore = 0x53,
    Bastore = 0x54,
    Castore = 0x55,
    Sastore = 0x56,

    // ===== Stack manipulation (0x57-0x5F) =====
    Pop = 0x57,
    Pop2 = 0x58,
    Dup = 0x59,
    DupX1 = 0x5A,
    DupX2 = 0x5B,
    Dup2 = 0x5C,
    Dup2X1 = 0x5D,
    Dup2X2 = 0x5E,
    Swap = 0x5F,

    // ===== Arithmetic (0x60-0x84) =====
    Iadd = 0x60,
    Ladd = 0x61,
    Fadd = 0x62,
    Dadd = 0x63,
    Isub = 0x64,
    Lsub = 0x65,
    Fsub = 0x66,
    Dsub = 0x67,
    Imul = 0x68,
    Lmul = 0x69,
    Fmul = 0x6A,
    Dmul = 0x6B,
    Idiv = 0x6C,
    Ldiv = 0x6D,
    Fdiv = 0x6E,
    Ddiv = 0x6F,
    Irem = 0x70,
    Lrem = 0x71,
    Frem = 0x72,
    Drem = 0x73,
    Ineg = 0x74,
    Lneg = 0x75,
    Fneg = 0x76,
    Dneg = 0x77,
    Ishl = 0x78,
    Lshl = 0x79,
    Ishr = 0x7A,
    Lshr = 0x7B,
    Iushr = 0x7C,
    Lushr = 0x7D,
    Iand = 0x7E,
    Land = 0x7F,
    Ior = 0x80,
    Lor = 0x81,
    Ixor = 0x82,
    Lxor = 0x83,
    Iinc = 0x84,

    // ===== Conversions (0x85-0x93) =====
    I2l = 0x85,
    I2f = 0x86,
    I2d = 0x87,
    L2i = 0x88,
    L2f = 0x89,
    L2d = 0x8A,
    F2i = 0x8B,
    F2l = 0x8C,
    F2d = 0x8D,
    D2i = 0x8E,
    D2l = 0x8F,
    D2f = 0x90,
    I2b = 0x91,
    I2c = 0x92,
    I2s = 0x93,

    // ===== Comparisons (0x94-0x98) =====
    Lcmp = 0x94,
    Fcmpl = 0x95,
    Fcmpg = 0x96,
    Dcmpl = 0x97,
    Dcmpg = 0x98,

    // ===== Control flow (0x99-0xB1) =====
    Ifeq = 0x99,
    Ifne = 0x9A,
    Iflt = 0x9B,
    Ifge = 0x9C,
    Ifgt = 0x9D,
    Ifle = 0x9E,
    IfIcmpeq = 0x9F,
    IfIcmpne = 0xA0,
    IfIcmplt = 0xA1,
    IfIcmpge = 0xA2,
    IfIcmpgt = 0xA3,
    IfIcmple = 0xA4,
    IfAcmpeq = 0xA5,
    IfAcmpne = 0xA6,
    Goto = 0xA7,
    Jsr = 0xA8,
    Ret = 0xA9,
    Tableswitch = 0xAA,
    Lookupswitch = 0xAB,
    Ireturn = 0xAC,
    Lreturn = 0xAD,
    Freturn = 0xAE,
    Dreturn = 0xAF,
    Areturn = 0xB0,
    Return = 0xB1,

    // ===== References and the rest (0xB2-0xC9) =====
    Getstatic = 0xB2,
    Putstatic = 0xB3,
    Getfield = 0xB4,
    Putfield = 0xB5,
    Invokevirtual = 0xB6,
    Invokespecial = 0xB7,
    Invokestatic = 0xB8,
    Invokeinterface = 0xB9,
    New = 0xBB,
    Newarray = 0xBC,
    Anewarray = 0xBD,
    Arraylength = 0xBE,
    Athrow = 0xBF,
    Checkcast = 0xC0,
    Instanceof = 0xC1,
    Monitorenter = 0xC2,
    Monitorexit = 0xC3,
    Wide = 0xC4,
    Multianewarray = 0xC5,
    Ifnull = 0xC6,
    Ifnonnull = 0xC7,
    GotoW = 0xC8,
    JsrW = 0xC9,
}

impl Opcode {
    /// Decode an opcode byte; 0xBA is unassigned in the supported set
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            // Constants
            0x00 => Some(Self::Nop),
            0x01 => Some(Self::AconstNull),
            0x02 => Some(Self::IconstM1),
            0x03 => Some(Self::Iconst0),
            0x04 => Some(Self::Iconst1),
            0x05 => Some(Self::Iconst2),
            0x06 => Some(Self::Iconst3),
            0x07 => Some(Self::Iconst4),
            0x08 => Some(Self::Iconst5),
            0x09 => Some(Self::Lconst0),
            0x0A => Some(Self::Lconst1),
            0x0B => Some(Self::Fconst0),
            0x0C => Some(Self::Fconst1),
            0x0D => Some(Self::Fconst2),
            0x0E => Some(Self::Dconst0),
            0x0F => Some(Self::Dconst1),
            0x10 => Some(Self::Bipush),
            0x11 => Some(Self::Sipush),
            0x12 => Some(Self::Ldc),
            0x13 => Some(Self::LdcW),
            0x14 => Some(Self::Ldc2W),
            // Loads
            0x15 => Some(Self::Iload),
            0x16 => Some(Self::Lload),
            0x17 => Some(Self::Fload),
            0x18 => Some(Self::Dload),
            0x19 => Some(Self::Aload),
            0x1A => Some(Self::Iload0),
            0x1B => Some(Self::Iload1),
            0x1C => Some(Self::Iload2),
            0x1D => Some(Self::Iload3),
            0x1E => Some(Self::Lload0),
            0x1F => Some(Self::Lload1),
            0x20 => Some(Self::Lload2),
            0x21 => Some(Self::Lload3),
            0x22 => Some(Self::Fload0),
            0x23 => Some(Self::Fload1),
            0x24 => Some(Self::Fload2),
            0x25 => Some(Self::Fload3),
            0x26 => Some(Self::Dload0),
            0x27 => Some(Self::Dload1),
            0x28 => Some(Self::Dload2),
            0x29 => Some(Self::Dload3),
            0x2A => Some(Self::Aload0),
            0x2B => Some(Self::Aload1),
            0x2C => Some(Self::Aload2),
            0x2D => Some(Self::Aload3),
            0x2E => Some(Self::Iaload),
            0x2F => Some(Self::Laload),
            0x30 => Some(Self::Faload),
            0x31 => Some(Self::Daload),
            0x32 => Some(Self::Aaload),
            0x33 => Some(Self::Baload),
            0x34 => Some(Self::Caload),
            0x35 => Some(Self::Saload),
            // Stores
            0x36 => Some(Self::Istore),
            0x37 => Some(Self::Lstore),
            0x38 => Some(Self::Fstore),
            0x39 => Some(Self::Dstore),
            0x3A => Some(Self::Astore),
            0x3B => Some(Self::Istore0),
            0x3C => Some(Self::Istore1),
            0x3D => Some(Self::Istore2),
            0x3E => Some(Self::Istore3),
            0x3F => Some(Self::Lstore0),
            0x40 => Some(Self::Lstore1),
            0x41 => Some(Self::Lstore2),
            0x42 => Some(Self::Lstore3),
            0x43 => Some(Self::Fstore0),
            0x44 => Some(Self::Fstore1),
            0x45 => Some(Self::Fstore2),
            0x46 => Some(Self::Fstore3),
            0x47 => Some(Self::Dstore0),
            0x48 => Some(Self::Dstore1),
            0x49 => Some(Self::Dstore2),
            0x4A => Some(Self::Dstore3),
            0x4B => Some(Self::Astore0),
            0x4C => Some(Self::Astore1),
            0x4D => Some(Self::Astore2),
            0x4E => Some(Self::Astore3),
            0x4F => Some(Self::Iastore),
            0x50 => Some(Self::Lastore),
            0x51 => Some(Self::Fastore),
            0x52 => Some(Self::Dastore),
            0x53 => Some(Self::Aastore),
            0x54 => Some(Self::Bastore),
            0x55 => Some(Self::Castore),
            0x56 => Some(Self::Sastore),
            // Stack manipulation
            0x57 => Some(Self::Pop),
            0x58 => Some(Self::Pop2),
            0x59 => Some(Self::Dup),
            0x5A => Some(Self::DupX1),
            0x5B => Some(Self::DupX2),
            0x5C => Some(Self::Dup2),
            0x5D => Some(Self::Dup2X1),
            0x5E => Some(Self::Dup2X2),
            0x5F => Some(Self::Swap),
            // Arithmetic
            0x60 => Some(Self::Iadd),
            0x61 => Some(Self::Ladd),
            0x62 => Some(Self::Fadd),
            0x63 => Some(Self::Dadd),
            0x64 => Some(Self::Isub),
            0x65 => Some(Self::Lsub),
            0x66 => Some(Self::Fsub),
            0x67 => Some(Self::Dsub),
            0x68 => Some(Self::Imul),
            0x69 => Some(Self::Lmul),
            0x6A => Some(Self::Fmul),
            0x6B => Some(Self::Dmul),
            0x6C => Some(Self::Idiv),
            0x6D => Some(Self::Ldiv),
            0x6E => Some(Self::Fdiv),
            0x6F => Some(Self::Ddiv),
            0x70 => Some(Self::Irem),
            0x71 => Some(Self::Lrem),
            0x72 => Some(Self::Frem),
            0x73 => Some(Self::Drem),
            0x74 => Some(Self::Ineg),
            0x75 => Some(Self::Lneg),
            0x76 => Some(Self::Fneg),
            0x77 => Some(Self::Dneg),
            0x78 => Some(Self::Ishl),
            0x79 => Some(Self::Lshl),
            0x7A => Some(Self::Ishr),
            0x7B => Some(Self::Lshr),
            0x7C => Some(Self::Iushr),
            0x7D => Some(Self::Lushr),
            0x7E => Some(Self::Iand),
            0x7F => Some(Self::Land),
            0x80 => Some(Self::Ior),
            0x81 => Some(Self::Lor),
            0x82 => Some(Self::Ixor),
            0x83 => Some(Self::Lxor),
            0x84 => Some(Self::Iinc),
            // Conversions
            0x85 => Some(Self::I2l),
            0x86 => Some(Self::I2f),
            0x87 => Some(Self::I2d),
            0x88 => Some(Self::L2i),
            0x89 => Some(Self::L2f),
            0x8A => Some(Self::L2d),
            0x8B => Some(Self::F2i),
            0x8C => Some(Self::F2l),
            0x8D => Some(Self::F2d),
            0x8E => Some(Self::D2i),
            0x8F => Some(Self::D2l),
            0x90 => Some(Self::D2f),
            0x91 => Some(Self::I2b),
            0x92 => Some(Self::I2c),
            0x93 => Some(Self::I2s),
            // Comparisons
            0x94 => Some(Self::Lcmp),
            0x95 => Some(Self::Fcmpl),
            0x96 => Some(Self::Fcmpg),
            0x97 => Some(Self::Dcmpl),
            0x98 => Some(Self::Dcmpg),
            // Control flow
            0x99 => Some(Self::Ifeq),
            0x9A => Some(Self::Ifne),
            0x9B => Some(Self::Iflt),
            0x9C => Some(Self::Ifge),
            0x9D => Some(Self::Ifgt),
            0x9E => Some(Self::Ifle),
            0x9F => Some(Self::IfIcmpeq),
            0xA0 => Some(Self::IfIcmpne),
            0xA1 => Some(Self::IfIcmplt),
            0xA2 => Some(Self::IfIcmpge),
            0xA3 => Some(Self::IfIcmpgt),
            0xA4 => Some(Self::IfIcmple),
            0xA5 => Some(Self::IfAcmpeq),
            0xA6 => Some(Self::IfAcmpne),
            0xA7 => Some(Self::Goto),
            0xA8 => Some(Self::Jsr),
            0xA9 => Some(Self::Ret),
            0xAA => Some(Self::Tableswitch),
            0xAB => Some(Self::Lookupswitch),
            0xAC => Some(Self::Ireturn),
            0xAD => Some(Self::Lreturn),
            0xAE => Some(Self::Freturn),
            0xAF => Some(Self::Dreturn),
            0xB0 => Some(Self::Areturn),
            0xB1 => Some(Self::Return),
            // References and the rest
            0xB2 => Some(Self::Getstatic),
            0xB3 => Some(Self::Putstatic),
            0xB4 => Some(Self::Getfield),
            0xB5 => Some(Self::Putfield),
            0xB6 => Some(Self::Invokevirtual),
            0xB7 => Some(Self::Invokespecial),
            0xB8 => Some(Self::Invokestatic),
            0xB9 => Some(Self::Invokeinterface),
            0xBB => Some(Self::New),
            0xBC => Some(Self::Newarray),
            0xBD => Some(Self::Anewarray),
            0xBE => Some(Self::Arraylength),
            0xBF => Some(Self::Athrow),
            0xC0 => Some(Self::Checkcast),
            0xC1 => Some(Self::Instanceof),
            0xC2 => Some(Self::Monitorenter),
            0xC3 => Some(Self::Monitorexit),
            0xC4 => Some(Self::Wide),
            0xC5 => Some(Self::Multianewarray),
            0xC6 => Some(Self::Ifnull),
            0xC7 => Some(Self::Ifnonnull),
            0xC8 => Some(Self::GotoW),
            0xC9 => Some(Self::JsrW),
            _ => None,
        }
    }

    /// The classfile mnemonic for this opcode
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::AconstNull => "aconst_null",
            Opcode::IconstM1 => "iconst_m1",
            Opcode::Iconst0 => "iconst_0",
            Opcode::Iconst1 => "iconst_1",
            Opcode::Iconst2 => "iconst_2",
            Opcode::Iconst3 => "iconst_3",
            Opcode::Iconst4 => "iconst_4",
            Opcode::Iconst5 => "iconst_5",
            Opcode::Lconst0 => "lconst_0",
            Opcode::Lconst1 => "lconst_1",
            Opcode::Fconst0 => "fconst_0",
            Opcode::Fconst1 => "fconst_1",
            Opcode::Fconst2 => "fconst_2",
            Opcode::Dconst0 => "dconst_0",
            Opcode::Dconst1 => "dconst_1",
            Opcode::Bipush => "bipush",
            Opcode::Sipush => "sipush",
            Opcode::Ldc => "ldc",
            Opcode::LdcW => "ldc_w",
            Opcode::Ldc2W => "ldc2_w",
            Opcode::Iload => "iload",
            Opcode::Lload => "lload",
            Opcode::Fload => "fload",
            Opcode::Dload => "dload",
            Opcode::Aload => "aload",
            Opcode::Iload0 => "iload_0",
            Opcode::Iload1 => "iload_1",
            Opcode::Iload2 => "iload_2",
            Opcode::Iload3 => "iload_3",
            Opcode::Lload0 => "lload_0",
            Opcode::Lload1 => "lload_1",
            Opcode::Lload2 => "lload_2",
            Opcode::Lload3 => "lload_3",
            Opcode::Fload0 => "fload_0",
            Opcode::Fload1 => "fload_1",
            Opcode::Fload2 => "fload_2",
            Opcode::Fload3 => "fload_3",
            Opcode::Dload0 => "dload_0",
            Opcode::Dload1 => "dload_1",
            Opcode::Dload2 => "dload_2",
            Opcode::Dload3 => "dload_3",
            Opcode::Aload0 => "aload_0",
            Opcode::Aload1 => "aload_1",
            Opcode::Aload2 => "aload_2",
            Opcode::Aload3 => "aload_3",
            Opcode::Iaload => "iaload",
            Opcode::Laload => "laload",
            Opcode::Faload => "faload",
            Opcode::Daload => "daload",
            Opcode::Aaload => "aaload",
            Opcode::Baload => "baload",
            Opcode::Caload => "caload",
            Opcode::Saload => "saload",
            Opcode::Istore => "istore",
            Opcode::Lstore => "lstore",
            Opcode::Fstore => "fstore",
            Opcode::Dstore => "dstore",
            Opcode::Astore => "astore",
            Opcode::Istore0 => "istore_0",
            Opcode::Istore1 => "istore_1",
            Opcode::Istore2 => "istore_2",
            Opcode::Istore3 => "istore_3",
            Opcode::Lstore0 => "lstore_0",
            Opcode::Lstore1 => "lstore_1",
            Opcode::Lstore2 => "lstore_2",
            Opcode::Lstore3 => "lstore_3",
            Opcode::Fstore0 => "fstore_0",
            Opcode::Fstore1 => "fstore_1",
            Opcode::Fstore2 => "fstore_2",
            Opcode::Fstore3 => "fstore_3",
            Opcode::Dstore0 => "dstore_0",
            Opcode::Dstore1 => "dstore_1",
            Opcode::Dstore2 => "dstore_2",
            Opcode::Dstore3 => "dstore_3",
            Opcode::Astore0 => "astore_0",
            Opcode::Astore1 => "astore_1",
            Opcode::Astore2 => "astore_2",
            Opcode::Astore3 => "astore_3",
            Opcode::Iastore => "iastore",
            Opcode::Lastore => "lastore",
            Opcode::Fastore => "fastore",
            Opcode::Dastore => "dastore",
            Opcode::Aastore => "aastore",
            Opcode::Bastore => "bastore",
            Opcode::Castore => "castore",
            Opcode::Sastore => "sastore",
            Opcode::Pop => "pop",
            Opcode::Pop2 => "pop2",
            Opcode::Dup => "dup",
            Opcode::DupX1 => "dup_x1",
            Opcode::DupX2 => "dup_x2",
            Opcode::Dup2 => "dup2",
            Opcode::Dup2X1 => "dup2_x1",
            Opcode::Dup2X2 => "dup2_x2",
            Opcode::Swap => "swap",
            Opcode::Iadd => "iadd",
            Opcode::Ladd => "ladd",
            Opcode::Fadd => "fadd",
            Opcode::Dadd => "dadd",
            Opcode::Isub => "isub",
            Opcode::Lsub => "lsub",
            Opcode::Fsub => "fsub",
            Opcode::Dsub => "dsub",
            Opcode::Imul => "imul",
            Opcode::Lmul => "lmul",
            Opcode::Fmul => "fmul",
            Opcode::Dmul => "dmul",
            Opcode::Idiv => "idiv",
            Opcode::Ldiv => "ldiv",
            Opcode::Fdiv => "fdiv",
            Opcode::Ddiv => "ddiv",
            Opcode::Irem => "irem",
            Opcode::Lrem => "lrem",
            Opcode::Frem => "frem",
            Opcode::Drem => "drem",
            Opcode::Ineg => "ineg",
            Opcode::Lneg => "lneg",
            Opcode::Fneg => "fneg",
            Opcode::Dneg => "dneg",
            Opcode::Ishl => "ishl",
            Opcode::Lshl => "lshl",
            Opcode::Ishr => "ishr",
            Opcode::Lshr => "lshr",
            Opcode::Iushr => "iushr",
            Opcode::Lushr => "lushr",
            Opcode::Iand => "iand",
            Opcode::Land => "land",
            Opcode::Ior => "ior",
            Opcode::Lor => "lor",
            Opcode::Ixor => "ixor",
            Opcode::Lxor => "lxor",
            Opcode::Iinc => "iinc",
            Opcode::I2l => "i2l",
            Opcode::I2f => "i2f",
            Opcode::I2d => "i2d",
            Opcode::L2i => "l2i",
            Opcode::L2f => "l2f",
            Opcode::L2d => "l2d",
            Opcode::F2i => "f2i",
            Opcode::F2l => "f2l",
            Opcode::F2d => "f2d",
            Opcode::D2i => "d2i",
            Opcode::D2l => "d2l",
            Opcode::D2f => "d2f",
            Opcode::I2b => "i2b",
            Opcode::I2c => "i2c",
            Opcode::I2s => "i2s",
            Opcode::Lcmp => "lcmp",
            Opcode::Fcmpl => "fcmpl",
            Opcode::Fcmpg => "fcmpg",
            Opcode::Dcmpl => "dcmpl",
            Opcode::Dcmpg => "dcmpg",
            Opcode::Ifeq => "ifeq",
            Opcode::Ifne => "ifne",
            Opcode::Iflt => "iflt",
            Opcode::Ifge => "ifge",
            Opcode::Ifgt => "ifgt",
            Opcode::Ifle => "ifle",
            Opcode::IfIcmpeq => "if_icmpeq",
            Opcode::IfIcmpne => "if_icmpne",
            Opcode::IfIcmplt => "if_icmplt",
            Opcode::IfIcmpge => "if_icmpge",
            Opcode::IfIcmpgt => "if_icmpgt",
            Opcode::IfIcmple => "if_icmple",
            Opcode::IfAcmpeq => "if_acmpeq",
            Opcode::IfAcmpne => "if_acmpne",
            Opcode::Goto => "goto",
            Opcode::Jsr => "jsr",
            Opcode::Ret => "ret",
            Opcode::Tableswitch => "tableswitch",
            Opcode::Lookupswitch => "lookupswitch",
            Opcode::Ireturn => "ireturn",
            Opcode::Lreturn => "lreturn",
            Opcode::Freturn => "freturn",
            Opcode::Dreturn => "dreturn",
            Opcode::Areturn => "areturn",
            Opcode::Return => "return",
            Opcode::Getstatic => "getstatic",
            Opcode::Putstatic => "putstatic",
            Opcode::Getfield => "getfield",
            Opcode::Putfield => "putfield",
            Opcode::Invokevirtual => "invokevirtual",
            Opcode::Invokespecial => "invokespecial",
            Opcode::Invokestatic => "invokestatic",
            Opcode::Invokeinterface => "invokeinterface",
            Opcode::New => "new",
            Opcode::Newarray => "newarray",
            Opcode::Anewarray => "anewarray",
            Opcode::Arraylength => "arraylength",
            Opcode::Athrow => "athrow",
            Opcode::Checkcast => "checkcast",
            Opcode::Instanceof => "instanceof",
            Opcode::Monitorenter => "monitorenter",
            Opcode::Monitorexit => "monitorexit",
            Opcode::Wide => "wide",
            Opcode::Multianewarray => "multianewarray",
            Opcode::Ifnull => "ifnull",
            Opcode::Ifnonnull => "ifnonnull",
            Opcode::GotoW => "goto_w",
            Opcode::JsrW => "jsr_w",
        }
    }

    /// True when execution can continue with the next instruction
    pub fn falls_through(&self) -> bool {
        !matches!(
            self,
            Opcode::Goto
                | Opcode::GotoW
                | Opcode::Ret
                | Opcode::Tableswitch
                | Opcode::Lookupswitch
                | Opcode::Ireturn
                | Opcode::Lreturn
                | Opcode::Freturn
                | Opcode::Dreturn
                | Opcode::Areturn
                | Opcode::Return
                | Opcode::Athrow
        )
    }

    /// True for opcodes carrying a single branch-target operand
    pub fn is_branch(&self) -> bool {
        matches!(
            self,
            Opcode::Ifeq
                | Opcode::Ifne
                | Opcode::Iflt
                | Opcode::Ifge
                | Opcode::Ifgt
                | Opcode::Ifle
                | Opcode::IfIcmpeq
                | Opcode::IfIcmpne
                | Opcode::IfIcmplt
                | Opcode::IfIcmpge
                | Opcode::IfIcmpgt
                | Opcode::IfIcmple
                | Opcode::IfAcmpeq
                | Opcode::IfAcmpne
                | Opcode::Ifnull
                | Opcode::Ifnonnull
                | Opcode::Goto
                | Opcode::GotoW
                | Opcode::Jsr
                | Opcode::JsrW
        )
    }

    /// True for the two switch opcodes
    pub fn is_switch(&self) -> bool {
        matches!(self, Opcode::Tableswitch | Opcode::Lookupswitch)
    }

    /// The local slot baked into the short load/store forms
    pub fn implicit_slot(&self) -> Option<u16> {
        let slot = match self {
            Opcode::Iload0 | Opcode::Lload0 | Opcode::Fload0 | Opcode::Dload0 | Opcode::Aload0 => 0,
            Opcode::Iload1 | Opcode::Lload1 | Opcode::Fload1 | Opcode::Dload1 | Opcode::Aload1 => 1,
            Opcode::Iload2 | Opcode::Lload2 | Opcode::Fload2 | Opcode::Dload2 | Opcode::Aload2 => 2,
            Opcode::Iload3 | Opcode::Lload3 | Opcode::Fload3 | Opcode::Dload3 | Opcode::Aload3 => 3,
            Opcode::Istore0
            | Opcode::Lstore0
            | Opcode::Fstore0
            | Opcode::Dstore0
            | Opcode::Astore0 => 0,
            Opcode::Istore1
            | Opcode::Lstore1
            | Opcode::Fstore1
            | Opcode::Dstore1
            | Opcode::Astore1 => 1,
            Opcode::Istore2
            | Opcode::Lstore2
            | Opcode::Fstore2
            | Opcode::Dstore2
            | Opcode::Astore2 => 2,
            Opcode::Istore3
            | Opcode::Lstore3
            | Opcode::Fstore3
            | Opcode::Dstore3
            | Opcode::Astore3 => 3,
            _ => return None,
        };
        Some(slot)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_byte_roundtrip() {
        for byte in 0u16..=0xFF {
            let byte = byte as u8;
            match Opcode::from_u8(byte) {
                Some(op) => assert_eq!(op as u8, byte),
                None => assert!(byte == 0xBA || byte > Opcode::JsrW as u8),
            }
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(Opcode::Iadd as u8, 0x60);
        assert_eq!(Opcode::Invokevirtual as u8, 0xB6);
        assert_eq!(Opcode::from_u8(0xA7), Some(Opcode::Goto));
        assert_eq!(Opcode::from_u8(0xBA), None);
    }

    #[test]
    fn test_mnemonics() {
        assert_eq!(Opcode::IfIcmpge.mnemonic(), "if_icmpge");
        assert_eq!(Opcode::AconstNull.mnemonic(), "aconst_null");
        assert_eq!(format!("{}", Opcode::Dup2X1), "dup2_x1");
    }

    #[test]
    fn test_falls_through() {
        assert!(Opcode::Iadd.falls_through());
        assert!(Opcode::Ifeq.falls_through());
        assert!(Opcode::Jsr.falls_through());
        assert!(!Opcode::Goto.falls_through());
        assert!(!Opcode::Return.falls_through());
        assert!(!Opcode::Athrow.falls_through());
        assert!(!Opcode::Tableswitch.falls_through());
    }

    #[test]
    fn test_branch_and_switch_predicates() {
        assert!(Opcode::Ifeq.is_branch());
        assert!(Opcode::IfAcmpne.is_branch());
        assert!(Opcode::Goto.is_branch());
        assert!(Opcode::Jsr.is_branch());
        assert!(!Opcode::Ret.is_branch());
        assert!(!Opcode::Tableswitch.is_branch());
        assert!(Opcode::Tableswitch.is_switch());
        assert!(Opcode::Lookupswitch.is_switch());
        assert!(!Opcode::Goto.is_switch());
    }

    #[test]
    fn test_implicit_slots() {
        assert_eq!(Opcode::Aload0.implicit_slot(), Some(0));
        assert_eq!(Opcode::Dstore3.implicit_slot(), Some(3));
        assert_eq!(Opcode::Iload.implicit_slot(), None);
    }
}
