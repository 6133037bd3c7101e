use crate::codegen::{
    machine::{
        abi::{CallingConvention, Slot, SlotPair},
        ValueType,
    },
    targets::x86::PhysicalRegister,
};

/// The 32-bit x86 convention: every argument is passed in the outgoing
/// stack area, no registers. Results come back in AX, in DX:AX for 64-bit
/// integers, or on the x87 stack top for floats.
#[derive(Default)]
pub struct Ia32;

impl CallingConvention for Ia32 {
    type Reg = PhysicalRegister;

    fn parameter_slots(
        params: impl Iterator<Item = ValueType>,
    ) -> impl Iterator<Item = SlotPair<Self::Reg>> {
        let mut offset = 0u32;
        params.map(move |ty| {
            let pair = match ty {
                // No native 64-bit carrier: two consecutive words, high
                // word above the low word.
                ValueType::Int64 => SlotPair::Split {
                    high: Slot::Stack {
                        offset: offset + 1,
                        ty: ValueType::Int32,
                    },
                    low: Slot::Stack {
                        offset,
                        ty: ValueType::Int32,
                    },
                },
                _ => SlotPair::Single(Slot::Stack { offset, ty }),
            };
            offset += ty.words();
            pair
        })
    }

    fn return_slot(ty: ValueType) -> SlotPair<Self::Reg> {
        match ty {
            ValueType::Int32 | ValueType::Any32 => {
                SlotPair::Single(Slot::Register(Self::Reg::AX))
            }
            ValueType::Int64 => SlotPair::Split {
                high: Slot::Register(Self::Reg::DX),
                low: Slot::Register(Self::Reg::AX),
            },
            ValueType::Single | ValueType::Float64 => {
                SlotPair::Single(Slot::Register(Self::Reg::FP0))
            }
            ValueType::Any64 => SlotPair::Single(Slot::Register(Self::Reg::X0)),
        }
    }
}
