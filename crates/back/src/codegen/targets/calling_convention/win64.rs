use crate::codegen::{
    machine::{
        abi::{CallingConvention, Slot, SlotPair},
        ValueType,
    },
    targets::x86::PhysicalRegister,
};

const INT_PARAM_REGS: [PhysicalRegister; 4] = [
    PhysicalRegister::CX,
    PhysicalRegister::DX,
    PhysicalRegister::R8,
    PhysicalRegister::R9,
];

const FLOAT_PARAM_REGS: [PhysicalRegister; 4] = [
    PhysicalRegister::X0,
    PhysicalRegister::X1,
    PhysicalRegister::X2,
    PhysicalRegister::X3,
];

/// The 64-bit Windows convention. One counter serves both register classes:
/// the k-th argument takes the k-th register of its own class, and taking
/// it burns index k in the other class's pool too. Independent per-class
/// counters would break Windows interoperability.
///
/// The four-word home area the callee may spill its register arguments
/// into is reserved by the stack-frame builder, not here.
#[derive(Default)]
pub struct Win64;

impl CallingConvention for Win64 {
    type Reg = PhysicalRegister;

    fn parameter_slots(
        params: impl Iterator<Item = ValueType>,
    ) -> impl Iterator<Item = SlotPair<Self::Reg>> {
        let mut next = 0usize;
        let mut offset = 0u32;
        params.map(move |ty| {
            let pool: &[PhysicalRegister] = if ty.is_float() {
                &FLOAT_PARAM_REGS
            } else {
                &INT_PARAM_REGS
            };
            match pool.get(next) {
                Some(&reg) => {
                    next += 1;
                    SlotPair::Single(Slot::Register(reg))
                }
                None => {
                    let slot = Slot::Stack { offset, ty };
                    offset += 2;
                    SlotPair::Single(slot)
                }
            }
        })
    }

    fn return_slot(ty: ValueType) -> SlotPair<Self::Reg> {
        if ty.is_float() {
            SlotPair::Single(Slot::Register(Self::Reg::X0))
        } else {
            SlotPair::Single(Slot::Register(Self::Reg::AX))
        }
    }
}
