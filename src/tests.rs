#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use regex::Regex;

    use crate::alphabet::{DIGITS, LETTERS, SYMBOLS, alphabet_for};
    use crate::{
        ClipboardError, ClipboardExporter, ControllerState, DeniedClipboard, GenerationOptions,
        KeysmithError, MemoryClipboard, PasswordChanged, PasswordController, PasswordSampler,
        build_alphabet, generate_password,
    };

    fn init() {
        let _ = env_logger::builder().is_test(true).filter_level(log::LevelFilter::Trace).try_init();
    }

    fn controller(seed: u64) -> PasswordController<rand::rngs::StdRng, MemoryClipboard> {
        PasswordController::new(PasswordSampler::seeded(seed), ClipboardExporter::new(MemoryClipboard::default()))
    }

    #[test]
    fn test_alphabet_sizes() {
        let base = GenerationOptions::default();
        assert_eq!(build_alphabet(&base).len(), 52);
        assert_eq!(build_alphabet(&base.with_digits(true)).len(), 62);
        assert_eq!(build_alphabet(&base.with_symbols(true)).len(), 81);
        assert_eq!(build_alphabet(&base.with_digits(true).with_symbols(true)).len(), 91);

        for (digits, symbols) in [(false, false), (true, false), (false, true), (true, true)] {
            let alphabet = alphabet_for(digits, symbols);
            assert!(LETTERS.chars().all(|c| alphabet.contains(c)));
        }
    }

    #[test]
    fn test_length_and_membership() {
        init();
        let mut sampler = PasswordSampler::seeded(7);
        for length in [6, 8, 37, 100] {
            for (digits, symbols) in [(false, false), (true, false), (false, true), (true, true)] {
                let options = GenerationOptions::new(length, digits, symbols).unwrap();
                let alphabet = build_alphabet(&options);
                let password = sampler.generate_for(&options);

                assert_eq!(password.chars().count(), options.length);
                assert!(password.chars().all(|c| alphabet.contains(c)), "{password} escapes {alphabet}");
            }
        }
    }

    #[test]
    fn test_seeded_idempotence() {
        let options = GenerationOptions::new(40, true, true).unwrap();
        let first: Vec<String> = {
            let mut sampler = PasswordSampler::seeded(42);
            (0..5).map(|_| sampler.generate_for(&options)).collect()
        };
        let second: Vec<String> = {
            let mut sampler = PasswordSampler::seeded(42);
            (0..5).map(|_| sampler.generate_for(&options)).collect()
        };
        assert_eq!(first, second);

        let mut a = controller(9);
        let mut b = controller(9);
        assert_eq!(a.password(), b.password());
        a.set_length(20).unwrap();
        b.set_length(20).unwrap();
        assert_eq!(a.password(), b.password());
    }

    #[test]
    fn test_distribution_chi_square() {
        let alphabet = alphabet_for(false, false);
        let size = alphabet.len();
        let draws = size * 1000;
        let mut sampler = PasswordSampler::seeded(2024);

        let mut counts: HashMap<char, usize> = HashMap::new();
        for _ in 0..draws {
            *counts.entry(sampler.draw(alphabet)).or_default() += 1;
        }
        assert_eq!(counts.len(), size);

        let expected = draws as f64 / size as f64;
        let chi_square: f64 = alphabet
            .chars()
            .iter()
            .map(|c| {
                let observed = *counts.get(c).unwrap_or(&0) as f64;
                (observed - expected).powi(2) / expected
            })
            .sum();

        // 51 degrees of freedom, p = 0.0001 is about 99.6
        assert!(chi_square < 99.6, "chi-square {chi_square} too large");
    }

    #[test]
    fn test_scenario_letters_only() {
        let re = Regex::new(r"^[A-Za-z]{8}$").unwrap();
        let mut sampler = PasswordSampler::thread();
        let options = GenerationOptions::new(8, false, false).unwrap();
        for _ in 0..50 {
            let password = sampler.generate_for(&options);
            assert!(re.is_match(&password), "{password}");
        }
    }

    #[test]
    fn test_scenario_digits() {
        let re = Regex::new(r"^[A-Za-z0-9]{12}$").unwrap();
        let mut sampler = PasswordSampler::seeded(3);
        let options = GenerationOptions::new(12, true, false).unwrap();

        let mut saw_digit = false;
        for _ in 0..200 {
            let password = sampler.generate_for(&options);
            assert!(re.is_match(&password), "{password}");
            saw_digit |= password.chars().any(|c| DIGITS.contains(c));
        }
        assert!(saw_digit);
    }

    #[test]
    fn test_scenario_toggle_symbols() {
        init();
        let mut controller = controller(11);
        let before = controller.generation();
        assert_eq!(controller.options().length, 8);

        controller.toggle_symbols();

        assert_eq!(controller.generation(), before + 1);
        assert_eq!(controller.options().length, 8);
        assert!(controller.options().include_symbols);
        assert_eq!(controller.alphabet().len(), 81);
        let password = controller.password();
        assert_eq!(password.chars().count(), 8);
        assert!(password.chars().all(|c| LETTERS.contains(c) || SYMBOLS.contains(c)));
        assert!(!password.chars().any(|c| c.is_ascii_digit()));
        assert_eq!(controller.field().value(), password);
    }

    #[test]
    fn test_controller_mount() {
        let controller = controller(1);
        assert_eq!(controller.options(), &GenerationOptions::default());
        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(controller.password().len(), 8);
    }

    #[test]
    fn test_controller_memoizes_alphabet() {
        let mut controller = controller(5);
        assert_eq!(controller.alphabet_rebuilds(), 1);

        controller.set_length(30).unwrap();
        controller.set_length(12).unwrap();
        controller.regenerate();
        assert_eq!(controller.alphabet_rebuilds(), 1);
        assert_eq!(controller.generation(), 4);

        controller.toggle_digits();
        assert_eq!(controller.alphabet_rebuilds(), 2);
        assert_eq!(controller.alphabet().len(), 62);
    }

    #[test]
    fn test_controller_noop_setters() {
        let mut controller = controller(5);
        let password = controller.password().to_string();

        controller.set_length(8).unwrap();
        controller.set_include_digits(false);
        controller.set_options(GenerationOptions::default()).unwrap();

        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.password(), password);
    }

    #[test]
    fn test_controller_rejects_invalid_length() {
        let mut controller = controller(5);
        let password = controller.password().to_string();

        for length in [-1, 0, 5, 101] {
            let err = controller.set_length(length).unwrap_err();
            assert_eq!(err, KeysmithError::InvalidLength { length, min: 6, max: 100 });
        }
        let oversized = GenerationOptions { length: 500, include_digits: true, include_symbols: false };
        assert!(controller.set_options(oversized).is_err());

        assert_eq!(controller.options(), &GenerationOptions::default());
        assert_eq!(controller.password(), password);
        assert_eq!(controller.generation(), 1);
    }

    #[test]
    fn test_controller_publishes() {
        let mut controller = controller(8);
        let events: Rc<RefCell<Vec<PasswordChanged>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        controller.set_length(16).unwrap();
        controller.set_include_digits(true);

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].options.length, 16);
        assert!(!events[0].options.include_digits);
        assert_eq!(events[1].generation, 3);
        assert!(events[1].options.include_digits);
        assert_eq!(events[1].password, controller.password());
    }

    #[test]
    fn test_clipboard_success() {
        init();
        let mut exporter = ClipboardExporter::new(MemoryClipboard::default());
        assert!(exporter.copy_to_clipboard("Ab3!xyz9").is_ok());
        assert_eq!(exporter.backend().contents(), Some("Ab3!xyz9"));
        assert_eq!(exporter.backend().writes(), 1);
    }

    #[test]
    fn test_clipboard_denied() {
        init();
        let mut exporter = ClipboardExporter::new(DeniedClipboard);
        assert_eq!(
            exporter.copy_to_clipboard("Ab3!xyz9"),
            Err(KeysmithError::ClipboardUnavailable(ClipboardError::Denied))
        );

        let mut controller = PasswordController::new(PasswordSampler::seeded(1), ClipboardExporter::new(DeniedClipboard));
        assert!(matches!(controller.copy(), Err(KeysmithError::ClipboardUnavailable(_))));
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[test]
    fn test_controller_copy() {
        let mut controller = controller(21);
        controller.set_length(10).unwrap();
        controller.copy().unwrap();

        let password = controller.password().to_string();
        assert_eq!(controller.exporter().backend().contents(), Some(password.as_str()));
        assert_eq!(controller.field().selection(), Some(0..10));
    }

    #[test]
    fn test_generate_password_uses_thread_rng() {
        for (length, digits, symbols) in [(6, false, false), (12, true, false), (30, false, true), (100, true, true)] {
            let options = GenerationOptions::new(length, digits, symbols).unwrap();
            let alphabet = build_alphabet(&options);
            let password = generate_password(&options);

            assert_eq!(password.chars().count(), options.length);
            assert!(password.chars().all(|c| alphabet.contains(c)), "{password} escapes {alphabet}");
        }
    }

    #[test]
    fn test_subscribers_run_while_regenerating() {
        let mut controller = controller(13);
        let seen: Rc<RefCell<Vec<ControllerState>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.subscribe(move |event| sink.borrow_mut().push(event.state));

        controller.toggle_digits();
        controller.regenerate();

        assert_eq!(*seen.borrow(), vec![ControllerState::Regenerating, ControllerState::Regenerating]);
        assert_eq!(controller.state(), ControllerState::Idle);
    }
}
