use num_traits::{One, PrimInt};

/// Trait implemented by user-defined flag enums.
///
/// The enum's discriminant (via `#[repr(u8)]`) determines the bit index.
/// The backing integer type is chosen via the associated `Storage`.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A small value-type set of flags packed into a primitive integer.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, tag: U) {
        self.bits = self.bits | tag.mask();
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, tag: U) {
        self.bits = self.bits & !tag.mask();
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, tag: U) -> bool {
        (self.bits & tag.mask()) != T::zero()
    }

    pub fn clear(&mut self) {
        self.bits = T::zero();
    }
}

/// Declare a bitmask-backed enum and implement `FlagBitmask` for it.
///
/// Example:
/// ```rust
/// walker_shared::define_bitmask_flags!(Stance, u8, {
///     Crouched,
///     Sprinting,
/// });
/// ```
#[macro_export]
macro_rules! define_bitmask_flags {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::bitmask_flags::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::define_bitmask_flags!(Tag, u8, { A, B, C });

    #[test]
    fn add_remove_has() {
        let mut flags = BitmaskFlags::<u8>::default();
        assert_eq!(flags.bits, 0);

        flags.add(Tag::B);
        assert!(flags.has(Tag::B));
        assert!(!flags.has(Tag::A));
        assert_eq!(flags.bits, 0b010);

        // Adding twice is idempotent.
        flags.add(Tag::B);
        assert_eq!(flags.bits, 0b010);

        flags.remove(Tag::B);
        assert_eq!(flags.bits, 0);
    }

    #[test]
    fn clear_drops_everything() {
        let mut flags = BitmaskFlags::<u8>::default();
        flags.add(Tag::A);
        flags.add(Tag::C);
        assert_eq!(flags.bits, 0b101);

        flags.clear();
        assert_eq!(flags, BitmaskFlags::default());
    }
}
