pub use calling_convention::{CallingConvention, Slot, SlotPair};

pub mod calling_convention;
