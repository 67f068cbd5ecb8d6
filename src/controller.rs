use log::{debug, trace};
use rand::{Rng, rngs::ThreadRng};

use crate::{
    Alphabet, GenerationOptions, KeysmithError,
    alphabet::alphabet_for,
    clipboard::{ClipboardBackend, ClipboardExporter, DisplayField, SystemClipboard},
    options::LengthBounds,
    sampler::PasswordSampler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Regenerating,
}

/// Published to subscribers after every regeneration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChanged {
    pub password: String,
    pub options: GenerationOptions,
    /// Number of passwords generated so far, starting at 1 on mount.
    pub generation: u64,
    /// Listeners run while the controller is still `Regenerating`.
    pub state: ControllerState,
}

type Listener = Box<dyn FnMut(&PasswordChanged)>;

/// View-model owning the options and the password derived from them.
///
/// Every setter that changes an option regenerates synchronously before it
/// returns. The alphabet is only looked up again when a flag changes.
pub struct PasswordController<R: Rng = ThreadRng, B: ClipboardBackend = SystemClipboard> {
    options: GenerationOptions,
    bounds: LengthBounds,
    alphabet: &'static Alphabet,
    alphabet_rebuilds: u64,
    password: String,
    field: DisplayField,
    generation: u64,
    state: ControllerState,
    sampler: PasswordSampler<R>,
    exporter: ClipboardExporter<B>,
    listeners: Vec<Listener>,
}

impl<R: Rng, B: ClipboardBackend> PasswordController<R, B> {
    /// Mounts at default options and generates once.
    pub fn new(sampler: PasswordSampler<R>, exporter: ClipboardExporter<B>) -> Self {
        let options = GenerationOptions::default();
        let mut controller = Self {
            options,
            bounds: LengthBounds::default(),
            alphabet: alphabet_for(options.include_digits, options.include_symbols),
            alphabet_rebuilds: 1,
            password: String::new(),
            field: DisplayField::default(),
            generation: 0,
            state: ControllerState::Idle,
            sampler,
            exporter,
            listeners: Vec::new(),
        };
        controller.regenerate();
        controller
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn alphabet(&self) -> &Alphabet {
        self.alphabet
    }

    pub fn field(&self) -> &DisplayField {
        &self.field
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn alphabet_rebuilds(&self) -> u64 {
        self.alphabet_rebuilds
    }

    pub fn exporter(&self) -> &ClipboardExporter<B> {
        &self.exporter
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&PasswordChanged) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn set_length(&mut self, length: i64) -> Result<(), KeysmithError> {
        let length = self.bounds.check(length)?;
        if length != self.options.length {
            debug!("Length changed {} -> {}", self.options.length, length);
            self.options.length = length;
            self.regenerate();
        }
        Ok(())
    }

    pub fn set_include_digits(&mut self, include_digits: bool) {
        let options = self.options.with_digits(include_digits);
        self.apply(options);
    }

    pub fn set_include_symbols(&mut self, include_symbols: bool) {
        let options = self.options.with_symbols(include_symbols);
        self.apply(options);
    }

    pub fn toggle_digits(&mut self) {
        self.set_include_digits(!self.options.include_digits);
    }

    pub fn toggle_symbols(&mut self) {
        self.set_include_symbols(!self.options.include_symbols);
    }

    pub fn set_options(&mut self, options: GenerationOptions) -> Result<(), KeysmithError> {
        options.validate_within(&self.bounds)?;
        self.apply(options);
        Ok(())
    }

    fn apply(&mut self, options: GenerationOptions) {
        if options == self.options {
            return;
        }
        debug!("Options changed {:?} -> {:?}", self.options, options);
        self.options = options;
        self.regenerate();
    }

    /// Draws a new password for the current options and publishes it.
    pub fn regenerate(&mut self) {
        self.state = ControllerState::Regenerating;

        let key = (self.options.include_digits, self.options.include_symbols);
        let current = alphabet_for(key.0, key.1);
        if !std::ptr::eq(current, self.alphabet) {
            self.alphabet = current;
            self.alphabet_rebuilds += 1;
            debug!("Alphabet rebuilt with {} characters", current.len());
        }

        self.password = self.sampler.generate(self.alphabet, self.options.length);
        self.field.set_value(&self.password);
        self.generation += 1;
        trace!("Generation {} ready", self.generation);

        let event = PasswordChanged {
            password: self.password.clone(),
            options: self.options,
            generation: self.generation,
            state: self.state,
        };
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.state = ControllerState::Idle;
    }

    /// Selects the display field and copies the current password.
    pub fn copy(&mut self) -> Result<(), KeysmithError> {
        self.exporter.copy_field(&mut self.field)
    }
}
