use crate::codegen::{
    machine::{
        abi::{CallingConvention, Slot, SlotPair},
        ValueType,
    },
    targets::x86::PhysicalRegister,
};

/// Integer parameter registers in priority order.
const INT_PARAM_REGS: [PhysicalRegister; 6] = [
    PhysicalRegister::DI,
    PhysicalRegister::SI,
    PhysicalRegister::DX,
    PhysicalRegister::CX,
    PhysicalRegister::R8,
    PhysicalRegister::R9,
];

/// Float parameter registers in priority order.
const FLOAT_PARAM_REGS: [PhysicalRegister; 8] = [
    PhysicalRegister::X0,
    PhysicalRegister::X1,
    PhysicalRegister::X2,
    PhysicalRegister::X3,
    PhysicalRegister::X4,
    PhysicalRegister::X5,
    PhysicalRegister::X6,
    PhysicalRegister::X7,
];

/// The 64-bit ELF (System V) convention: six integer registers and eight
/// float registers, consumed by independent per-class counters; overflow
/// goes to the stack at an 8-byte stride.
#[derive(Default)]
pub struct SystemV;

impl CallingConvention for SystemV {
    type Reg = PhysicalRegister;

    fn parameter_slots(
        params: impl Iterator<Item = ValueType>,
    ) -> impl Iterator<Item = SlotPair<Self::Reg>> {
        let mut next_int = 0usize;
        let mut next_float = 0usize;
        let mut offset = 0u32;
        params.map(move |ty| {
            let (pool, counter): (&[PhysicalRegister], &mut usize) = if ty.is_float() {
                (&FLOAT_PARAM_REGS, &mut next_float)
            } else {
                (&INT_PARAM_REGS, &mut next_int)
            };
            match pool.get(*counter) {
                Some(&reg) => {
                    *counter += 1;
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

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(params: &[ValueType]) -> Vec<SlotPair<PhysicalRegister>> {
        SystemV::parameter_slots(params.iter().copied()).collect()
    }

    fn reg(reg: PhysicalRegister) -> SlotPair<PhysicalRegister> {
        SlotPair::Single(Slot::Register(reg))
    }

    #[test]
    fn no_parameters_yield_no_slots() {
        assert!(locate(&[]).is_empty());
    }

    #[test]
    fn seventh_integer_argument_spills_to_the_stack() {
        let slots = locate(&[ValueType::Int32; 7]);
        assert_eq!(
            slots,
            vec![
                reg(PhysicalRegister::DI),
                reg(PhysicalRegister::SI),
                reg(PhysicalRegister::DX),
                reg(PhysicalRegister::CX),
                reg(PhysicalRegister::R8),
                reg(PhysicalRegister::R9),
                SlotPair::Single(Slot::Stack {
                    offset: 0,
                    ty: ValueType::Int32
                }),
            ]
        );
    }

    #[test]
    fn classes_advance_independently() {
        let slots = locate(&[
            ValueType::Int32,
            ValueType::Float64,
            ValueType::Int64,
            ValueType::Single,
        ]);
        assert_eq!(
            slots,
            vec![
                reg(PhysicalRegister::DI),
                reg(PhysicalRegister::X0),
                reg(PhysicalRegister::SI),
                reg(PhysicalRegister::X1),
            ]
        );
    }

    #[test]
    fn float_pool_exhausts_after_eight() {
        let slots = locate(&[ValueType::Float64; 9]);
        assert_eq!(slots[7], reg(PhysicalRegister::X7));
        assert_eq!(
            slots[8],
            SlotPair::Single(Slot::Stack {
                offset: 0,
                ty: ValueType::Float64
            })
        );
    }

    #[test]
    fn stack_slots_advance_two_words_per_argument() {
        // Ten integers: six in registers, four on the stack.
        let slots = locate(&[ValueType::Int32; 10]);
        for (i, slot) in slots[6..].iter().enumerate() {
            assert_eq!(
                *slot,
                SlotPair::Single(Slot::Stack {
                    offset: 2 * i as u32,
                    ty: ValueType::Int32
                })
            );
        }
    }

    #[test]
    fn return_slots() {
        assert_eq!(SystemV::return_slot(ValueType::Int64), reg(PhysicalRegister::AX));
        assert_eq!(SystemV::return_slot(ValueType::Any64), reg(PhysicalRegister::AX));
        assert_eq!(SystemV::return_slot(ValueType::Float64), reg(PhysicalRegister::X0));
        assert_eq!(SystemV::return_slot(ValueType::Single), reg(PhysicalRegister::X0));
    }
}
