use smallvec::SmallVec;
use tracing::debug;

pub use ia32::Ia32;
pub use systemv::SystemV;
pub use win64::Win64;

use crate::codegen::{
    machine::{
        abi::{CallingConvention, Slot, SlotPair},
        Signature, TargetConfig,
    },
    targets::x86::PhysicalRegister,
};

pub mod ia32;
pub mod systemv;
pub mod win64;

/// The calling convention in effect for a target. Resolved once at compiler
/// startup; caller-side and callee-side lowering must consult the same value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Convention {
    Ia32,
    SystemV,
    Win64,
}

impl Convention {
    /// 32-bit targets use the single stack-only convention for both OS
    /// flavors; the OS axis only differentiates 64-bit targets.
    pub const fn for_target(target: TargetConfig) -> Self {
        if target.is_64_bit() {
            if target.is_win64() {
                Self::Win64
            } else {
                Self::SystemV
            }
        } else {
            Self::Ia32
        }
    }

    /// One slot pair per declared parameter, in declaration order.
    pub fn locate_parameters(self, sig: &Signature) -> SmallVec<[SlotPair<PhysicalRegister>; 6]> {
        debug!("Locating {} parameter(s) using {:?}", sig.params.len(), self);
        let params = sig.params.iter().copied();
        match self {
            Self::Ia32 => Ia32::parameter_slots(params).collect(),
            Self::SystemV => SystemV::parameter_slots(params).collect(),
            Self::Win64 => Win64::parameter_slots(params).collect(),
        }
    }

    /// Where the result lives after a call returns.
    pub fn locate_result(self, sig: &Signature) -> SlotPair<PhysicalRegister> {
        let ty = sig.result_type();
        debug!("Locating result {} using {:?}", ty, self);
        match self {
            Self::Ia32 => Ia32::return_slot(ty),
            Self::SystemV => SystemV::return_slot(ty),
            Self::Win64 => Win64::return_slot(ty),
        }
    }
}

impl Slot<PhysicalRegister> {
    /// The contract every located slot satisfies: registers must be
    /// caller-save, stack offsets must respect the slot type's alignment.
    /// Holds by construction; never consulted during compilation.
    pub fn is_acceptable(self, target: TargetConfig) -> bool {
        match self {
            Self::Register(reg) => !reg.is_callee_save(target),
            Self::Stack { offset, ty } => offset % ty.word_align() == 0,
        }
    }
}

impl SlotPair<PhysicalRegister> {
    /// Both halves of a register `Split` must additionally be distinct
    /// integer-class registers.
    pub fn is_acceptable(self, target: TargetConfig) -> bool {
        match self {
            Self::Single(slot) => slot.is_acceptable(target),
            Self::Split { high, low } => {
                if !high.is_acceptable(target) || !low.is_acceptable(target) {
                    return false;
                }
                match (high, low) {
                    (Slot::Register(h), Slot::Register(l)) => {
                        h != l && !h.is_float() && !l.is_float()
                    }
                    _ => true,
                }
            }
        }
    }
}

pub fn all_acceptable(pairs: &[SlotPair<PhysicalRegister>], target: TargetConfig) -> bool {
    pairs.iter().all(|pair| pair.is_acceptable(target))
}
