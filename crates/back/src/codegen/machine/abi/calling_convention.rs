use crate::codegen::machine::ValueType;

/// One storage location: a machine register, or a slot in the caller's
/// outgoing argument area. Stack offsets are measured in 4-byte words from
/// the base of that area (byte offset = 4 × word offset) and are
/// non-negative by construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Slot<R> {
    Register(R),
    Stack { offset: u32, ty: ValueType },
}

/// A single value's complete storage. `Split` carries one 64-bit integer
/// across two 32-bit carriers, high word first; it only arises on 32-bit
/// targets, where no native 64-bit register exists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SlotPair<R> {
    Single(Slot<R>),
    Split { high: Slot<R>, low: Slot<R> },
}

impl<R: Copy> SlotPair<R> {
    pub fn slots(&self) -> impl Iterator<Item = Slot<R>> + '_ {
        let (first, second) = match *self {
            Self::Single(slot) => (slot, None),
            Self::Split { high, low } => (high, Some(low)),
        };
        std::iter::once(first).chain(second)
    }

    pub fn registers(&self) -> impl Iterator<Item = R> + '_ {
        self.slots().filter_map(|slot| match slot {
            Slot::Register(reg) => Some(reg),
            Slot::Stack { .. } => None,
        })
    }
}

/// One platform calling convention: where parameters and the result of a
/// signature live across a call. Implementations are pure; two calls with
/// equal inputs yield identical slots.
pub trait CallingConvention {
    type Reg: Copy + Eq;

    fn parameter_slots(
        params: impl Iterator<Item = ValueType>,
    ) -> impl Iterator<Item = SlotPair<Self::Reg>>;

    fn return_slot(ty: ValueType) -> SlotPair<Self::Reg>;
}
