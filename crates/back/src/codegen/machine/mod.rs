pub mod abi;

/// The abstract kind of a value for layout purposes, not its exact bit
/// pattern. `Any32`/`Any64` stand for opaque register-sized data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
pub enum ValueType {
    Int32,
    Int64,
    Single,
    Float64,
    Any32,
    Any64,
}

impl ValueType {
    /// Size in 4-byte stack words.
    pub const fn words(self) -> u32 {
        match self {
            Self::Int32 | Self::Single | Self::Any32 => 1,
            Self::Int64 | Self::Float64 | Self::Any64 => 2,
        }
    }

    /// Required stack alignment in words. Only `Int64` slots must sit on an
    /// even word boundary; the x86 conventions allow everything else on any
    /// word boundary.
    pub const fn word_align(self) -> u32 {
        match self {
            Self::Int64 => 2,
            _ => 1,
        }
    }

    pub const fn bit_width(self) -> u32 {
        self.words() * 32
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::Single | Self::Float64)
    }
}

/// Return-value classification: a plain [`ValueType`] or one of the sub-word
/// integer kinds, which only exist on the return path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ReturnKind {
    Value(ValueType),
    Int8Signed,
    Int8Unsigned,
    Int16Signed,
    Int16Unsigned,
}

impl ReturnKind {
    /// The register-sized type actually carrying the result; sub-word kinds
    /// travel packed in a 32-bit register.
    pub const fn value_type(self) -> ValueType {
        match self {
            Self::Value(ty) => ty,
            Self::Int8Signed | Self::Int8Unsigned | Self::Int16Signed | Self::Int16Unsigned => {
                ValueType::Int32
            }
        }
    }

    pub const fn bit_width(self) -> u32 {
        match self {
            Self::Value(ty) => ty.bit_width(),
            Self::Int8Signed | Self::Int8Unsigned => 8,
            Self::Int16Signed | Self::Int16Unsigned => 16,
        }
    }

    /// Whether the callee leaves the upper bits of the result register
    /// unspecified, so the caller must sign- or zero-extend after the call.
    pub const fn needs_normalization(self) -> bool {
        matches!(
            self,
            Self::Int8Signed | Self::Int8Unsigned | Self::Int16Signed | Self::Int16Unsigned
        )
    }
}

/// Parameters arrive already extended by the caller's convention; no
/// callee-side re-normalization is ever required on x86.
pub const fn parameter_needs_normalization(_ty: ValueType) -> bool {
    false
}

/// A function's type signature as seen by the calling-convention layer.
/// Built once per declaration or call site and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<ValueType>,
    pub ret: Option<ReturnKind>,
}

impl Signature {
    pub const fn new(params: Vec<ValueType>, ret: Option<ReturnKind>) -> Self {
        Self { params, ret }
    }

    /// The projected result type; a signature without a declared result is
    /// located as if it returned `Int32`.
    pub fn result_type(&self) -> ValueType {
        self.ret.map_or(ValueType::Int32, ReturnKind::value_type)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Architecture {
    X86,
    X86_64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Os {
    Elf,
    Windows,
}

/// Static per-target configuration, fixed before compilation begins and
/// read-only for the lifetime of a run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    pub arch: Architecture,
    pub os: Os,
}

impl TargetConfig {
    pub const fn new(arch: Architecture, os: Os) -> Self {
        Self { arch, os }
    }

    pub const fn is_64_bit(self) -> bool {
        matches!(self.arch, Architecture::X86_64)
    }

    pub const fn is_win64(self) -> bool {
        matches!(self.arch, Architecture::X86_64) && matches!(self.os, Os::Windows)
    }
}

#[cfg(test)]
mod normalization_tests {
    use super::*;

    #[test]
    fn subword_return_kinds_need_normalization() {
        let inputs = [
            (ReturnKind::Int8Signed, true),
            (ReturnKind::Int8Unsigned, true),
            (ReturnKind::Int16Signed, true),
            (ReturnKind::Int16Unsigned, true),
            (ReturnKind::Value(ValueType::Int32), false),
            (ReturnKind::Value(ValueType::Int64), false),
            (ReturnKind::Value(ValueType::Single), false),
            (ReturnKind::Value(ValueType::Float64), false),
            (ReturnKind::Value(ValueType::Any32), false),
            (ReturnKind::Value(ValueType::Any64), false),
        ];
        for (kind, expected) in inputs {
            assert_eq!(
                kind.needs_normalization(),
                expected,
                "{:?} should need normalization: {}",
                kind,
                expected
            );
        }
    }

    #[test]
    fn parameters_never_need_normalization() {
        for ty in [
            ValueType::Int32,
            ValueType::Int64,
            ValueType::Single,
            ValueType::Float64,
            ValueType::Any32,
            ValueType::Any64,
        ] {
            assert!(!parameter_needs_normalization(ty));
        }
    }

    #[test]
    fn subword_kinds_project_to_int32() {
        for kind in [
            ReturnKind::Int8Signed,
            ReturnKind::Int8Unsigned,
            ReturnKind::Int16Signed,
            ReturnKind::Int16Unsigned,
        ] {
            assert_eq!(kind.value_type(), ValueType::Int32);
        }
    }

    #[test]
    fn missing_result_defaults_to_int32() {
        let sig = Signature::new(vec![], None);
        assert_eq!(sig.result_type(), ValueType::Int32);
    }
}
