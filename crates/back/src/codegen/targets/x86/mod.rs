use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use strum::VariantArray;

use crate::codegen::machine::TargetConfig;

/// The x86-family register file: the allocatable integer registers, the
/// flat float register file `X0..X15` (SSE) and `FP0` (x87 top of stack,
/// the 32-bit float-return carrier). `R8..R15` and `X8..X15` only exist on
/// 64-bit targets; identifiers name the full-width register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, VariantArray)]
pub enum PhysicalRegister {
    AX,
    BX,
    CX,
    DX,
    SI,
    DI,
    BP,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    X0,
    X1,
    X2,
    X3,
    X4,
    X5,
    X6,
    X7,
    X8,
    X9,
    X10,
    X11,
    X12,
    X13,
    X14,
    X15,
    FP0,
}

const FILE_32: &[PhysicalRegister] = &[
    PhysicalRegister::AX,
    PhysicalRegister::BX,
    PhysicalRegister::CX,
    PhysicalRegister::DX,
    PhysicalRegister::SI,
    PhysicalRegister::DI,
    PhysicalRegister::BP,
    PhysicalRegister::X0,
    PhysicalRegister::X1,
    PhysicalRegister::X2,
    PhysicalRegister::X3,
    PhysicalRegister::X4,
    PhysicalRegister::X5,
    PhysicalRegister::X6,
    PhysicalRegister::X7,
    PhysicalRegister::FP0,
];

impl PhysicalRegister {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Register class; fixed per register, independent of the target.
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            Self::X0
                | Self::X1
                | Self::X2
                | Self::X3
                | Self::X4
                | Self::X5
                | Self::X6
                | Self::X7
                | Self::X8
                | Self::X9
                | Self::X10
                | Self::X11
                | Self::X12
                | Self::X13
                | Self::X14
                | Self::X15
                | Self::FP0
        )
    }

    /// Whether a callee must restore this register before returning.
    ///
    /// Win64 callee-saves two more integer registers (SI, DI) and eight more
    /// float registers (X8..X15) than the ELF64 convention; on 32-bit
    /// targets SI and DI are callee-save as well.
    pub const fn is_callee_save(self, target: TargetConfig) -> bool {
        match self {
            Self::AX
            | Self::CX
            | Self::DX
            | Self::R8
            | Self::R9
            | Self::R10
            | Self::R11
            | Self::FP0 => false,
            Self::BX | Self::BP | Self::R12 | Self::R13 | Self::R14 | Self::R15 => true,
            Self::SI | Self::DI => {
                if target.is_64_bit() {
                    target.is_win64()
                } else {
                    true
                }
            }
            Self::X0
            | Self::X1
            | Self::X2
            | Self::X3
            | Self::X4
            | Self::X5
            | Self::X6
            | Self::X7 => false,
            Self::X8
            | Self::X9
            | Self::X10
            | Self::X11
            | Self::X12
            | Self::X13
            | Self::X14
            | Self::X15 => target.is_win64(),
        }
    }

    /// The registers that exist on the given target.
    pub fn file(target: TargetConfig) -> &'static [Self] {
        if target.is_64_bit() {
            Self::VARIANTS
        } else {
            FILE_32
        }
    }
}

/// The registers a call may clobber; codegen treats these as dead across
/// every call site.
pub fn caller_save_registers(target: TargetConfig) -> FxHashSet<PhysicalRegister> {
    PhysicalRegister::file(target)
        .iter()
        .copied()
        .filter(|reg| !reg.is_callee_save(target))
        .collect()
}

/// Allocation-order register pools, split by class and save discipline.
/// Caller-save ("preferred") registers come first so values that do not
/// live across calls avoid save/restore traffic. `FP0` is excluded: the
/// x87 stack top is a return carrier, not an allocation candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterPools {
    pub int_preferred: SmallVec<[PhysicalRegister; 16]>,
    pub int_remaining: SmallVec<[PhysicalRegister; 16]>,
    pub float_preferred: SmallVec<[PhysicalRegister; 16]>,
    pub float_remaining: SmallVec<[PhysicalRegister; 16]>,
}

impl RegisterPools {
    pub fn new(target: TargetConfig) -> Self {
        let mut pools = Self {
            int_preferred: SmallVec::new(),
            int_remaining: SmallVec::new(),
            float_preferred: SmallVec::new(),
            float_remaining: SmallVec::new(),
        };
        for &reg in PhysicalRegister::file(target) {
            if reg == PhysicalRegister::FP0 {
                continue;
            }
            let pool = match (reg.is_float(), reg.is_callee_save(target)) {
                (false, false) => &mut pools.int_preferred,
                (false, true) => &mut pools.int_remaining,
                (true, false) => &mut pools.float_preferred,
                (true, true) => &mut pools.float_remaining,
            };
            pool.push(reg);
        }
        pools
    }
}
