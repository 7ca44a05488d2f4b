//! Property tests for the register controller

use ledchar_hal::{Function, Pin, RamRegisters, RegisterController, FSEL_WORDS, LEVEL_WORDS, PIN_COUNT};
use proptest::prelude::*;

fn function_strategy() -> impl Strategy<Value = Function> {
    (0u32..8).prop_map(Function::from_code)
}

proptest! {
    #[test]
    fn function_select_only_touches_target(
        words in prop::array::uniform6(any::<u32>()),
        target in 0u8..PIN_COUNT,
        function in function_strategy(),
    ) {
        let target = Pin::new(target).unwrap();
        let before = RamRegisters::with_function_words(words);
        let mut ctl = RegisterController::new(before.clone());

        ctl.set_pin_function(target, function);

        prop_assert_eq!(ctl.pin_function(target), function);
        for pin in Pin::all().filter(|p| *p != target) {
            prop_assert_eq!(ctl.block().function(pin), before.function(pin));
        }
        // Words not owning the target are untouched, bits 30-31 included
        let slot = target.function_slot();
        for i in (0..FSEL_WORDS).filter(|i| *i != slot.word) {
            prop_assert_eq!(ctl.block().function_word(i), words[i]);
        }
    }

    #[test]
    fn output_only_touches_target(
        levels in prop::array::uniform2(any::<u32>()),
        target in 0u8..PIN_COUNT,
        high in any::<bool>(),
    ) {
        let target = Pin::new(target).unwrap();
        let before = RamRegisters::new().with_levels(levels);
        let mut ctl = RegisterController::new(before.clone());

        ctl.set_pin_output(target, high);

        prop_assert_eq!(ctl.block().level(target), high);
        for pin in Pin::all().filter(|p| *p != target) {
            prop_assert_eq!(ctl.block().level(pin), before.level(pin));
        }
    }

    #[test]
    fn set_and_clear_address_agree(target in 0u8..PIN_COUNT) {
        let target = Pin::new(target).unwrap();
        let mut ctl = RegisterController::new(RamRegisters::new());
        let addr = target.level_addr();
        prop_assert!(addr.word < LEVEL_WORDS);

        ctl.set_pin_output(target, true);
        ctl.set_pin_output(target, false);

        prop_assert_eq!(ctl.block().last_set_word(addr.word), addr.mask());
        prop_assert_eq!(ctl.block().last_clear_word(addr.word), addr.mask());
        prop_assert_eq!(ctl.block().levels(), [0; LEVEL_WORDS]);
    }
}
