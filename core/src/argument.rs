//! Declared-argument cells.
//!
//! A command stores one cell per declared argument. A cell holds the static
//! descriptor (description, short alias, validation pattern, default) next to
//! the value bound while parsing. The parser reaches the cells through
//! [`Argument`], a tagged borrow over the five cell kinds.
//!
//! # Example
//!
//! ```
//! use cmdline_core::{ArgumentCell, Flag, RequiredInput, ValueOption};
//!
//! let mut verbose = Flag::new("Prints verbose output").with_short('v');
//! let mut port = ValueOption::new(4040u16, "Listening port.")
//!     .with_short('p')
//!     .with_pattern(r"^\d+$");
//! let mut branch = RequiredInput::<String>::new("Branch to build");
//!
//! verbose.bind_flag();
//! port.bind("8080").unwrap();
//! branch.bind("main").unwrap();
//!
//! assert!(verbose.is_set());
//! assert_eq!(*port.value(), 8080);
//! assert_eq!(branch.value().map(String::as_str), Some("main"));
//! ```

use serde::Serialize;

use crate::error::Result;
use crate::value::ArgumentValue;

/// Kind of positional input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Must be supplied.
    Required,
    /// May be omitted.
    Optional,
    /// Consumes zero or more trailing tokens.
    Variadic,
}

/// Capability of a declared argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentKind {
    /// Boolean switch, `true` when present.
    Flag,
    /// Named argument carrying a value, with a default.
    Option,
    /// Positional argument.
    Input(InputKind),
}

/// Object-safe view of a value-carrying cell (options and inputs).
///
/// Implemented by [`ValueOption`], [`RequiredInput`], [`OptionalInput`] and
/// [`VariadicInput`]; the parser binds raw tokens through it without
/// knowing the value type.
pub trait ArgumentCell {
    /// Human-readable description shown in help text.
    fn description(&self) -> &str;

    /// Name assigned during tree resolution, if any.
    fn name(&self) -> Option<&str>;

    /// Assigns the declared name. Only the first call has an effect.
    fn assign_name(&mut self, name: &str);

    /// Single-character alias (`-p`), options only.
    fn short_name(&self) -> Option<char> {
        None
    }

    /// Regular expression the raw token must match before conversion.
    fn pattern(&self) -> Option<&str>;

    /// Placeholder for the value in help text (`--port <value>`).
    fn value_name(&self) -> &str {
        "value"
    }

    /// Textual default, options only.
    fn default_value(&self) -> Option<String> {
        None
    }

    /// Converts `raw` and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentFormat`](crate::CommandLineError::InvalidArgumentFormat)
    /// when conversion fails; the stored value is left untouched.
    fn bind(&mut self, raw: &str) -> Result<()>;

    /// Restores the declared default, discarding any bound value.
    fn reset(&mut self);
}

fn assign_once(slot: &mut Option<String>, name: &str) {
    if slot.is_none() {
        *slot = Some(name.to_string());
    }
}

/// A boolean switch: `true` when present on the command line.
///
/// Example: `-v` or `--verbose`.
#[derive(Debug, Clone)]
pub struct Flag {
    short: Option<char>,
    description: String,
    name: Option<String>,
    value: bool,
}

impl Flag {
    /// Creates an unset flag.
    pub fn new(description: &str) -> Self {
        Self {
            short: None,
            description: description.to_string(),
            name: None,
            value: false,
        }
    }

    /// Adds a single-character alias.
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Whether the flag was present.
    pub fn is_set(&self) -> bool {
        self.value
    }

    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Assigns the declared name. Only the first call has an effect.
    pub fn assign_name(&mut self, name: &str) {
        assign_once(&mut self.name, name);
    }

    /// Marks the flag as present.
    pub fn bind_flag(&mut self) {
        self.value = true;
    }

    pub fn reset(&mut self) {
        self.value = false;
    }
}

/// A named option carrying a value, with a default used when absent.
///
/// Example: `-p 8080` or `--port 8080`.
#[derive(Debug, Clone)]
pub struct ValueOption<T> {
    short: Option<char>,
    value_name: String,
    pattern: Option<String>,
    description: String,
    name: Option<String>,
    default: T,
    value: T,
}

impl<T: ArgumentValue + Clone> ValueOption<T> {
    /// Creates an option holding `default` until bound.
    pub fn new(default: T, description: &str) -> Self {
        Self {
            short: None,
            value_name: "value".to_string(),
            pattern: None,
            description: description.to_string(),
            name: None,
            value: default.clone(),
            default,
        }
    }

    /// Adds a single-character alias.
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Sets the placeholder shown in help text.
    pub fn with_value_name(mut self, value_name: &str) -> Self {
        self.value_name = value_name.to_string();
        self
    }

    /// Requires raw tokens to match `pattern` before conversion.
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    /// Current value: the bound one, or the default.
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn default(&self) -> &T {
        &self.default
    }
}

impl<T: ArgumentValue + Clone> ArgumentCell for ValueOption<T> {
    fn description(&self) -> &str {
        &self.description
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn assign_name(&mut self, name: &str) {
        assign_once(&mut self.name, name);
    }

    fn short_name(&self) -> Option<char> {
        self.short
    }

    fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    fn value_name(&self) -> &str {
        &self.value_name
    }

    fn default_value(&self) -> Option<String> {
        Some(self.default.to_argument())
    }

    fn bind(&mut self, raw: &str) -> Result<()> {
        self.value = T::from_argument(raw)?;
        Ok(())
    }

    fn reset(&mut self) {
        self.value = self.default.clone();
    }
}

/// Storage behind a positional input: a single slot or an accumulating list.
trait InputSlot<T> {
    fn store(&mut self, value: T);
    fn clear(&mut self);
}

impl<T> InputSlot<T> for Option<T> {
    fn store(&mut self, value: T) {
        *self = Some(value);
    }

    fn clear(&mut self) {
        *self = None;
    }
}

impl<T> InputSlot<T> for Vec<T> {
    fn store(&mut self, value: T) {
        self.push(value);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

macro_rules! input_cell {
    ($(#[$meta:meta])* $cell:ident, $storage:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $cell<T> {
            pattern: Option<String>,
            description: String,
            name: Option<String>,
            value: $storage,
        }

        impl<T: ArgumentValue> $cell<T> {
            pub fn new(description: &str) -> Self {
                Self {
                    pattern: None,
                    description: description.to_string(),
                    name: None,
                    value: Default::default(),
                }
            }

            /// Requires raw tokens to match `pattern` before conversion.
            pub fn with_pattern(mut self, pattern: &str) -> Self {
                self.pattern = Some(pattern.to_string());
                self
            }
        }

        impl<T: ArgumentValue> ArgumentCell for $cell<T> {
            fn description(&self) -> &str {
                &self.description
            }

            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }

            fn assign_name(&mut self, name: &str) {
                assign_once(&mut self.name, name);
            }

            fn pattern(&self) -> Option<&str> {
                self.pattern.as_deref()
            }

            fn bind(&mut self, raw: &str) -> Result<()> {
                self.value.store(T::from_argument(raw)?);
                Ok(())
            }

            fn reset(&mut self) {
                InputSlot::<T>::clear(&mut self.value);
            }
        }
    };
}

input_cell!(
    /// A positional input that must be supplied.
    ///
    /// Example: `build main`.
    RequiredInput,
    Option<T>
);

input_cell!(
    /// A positional input that may be omitted.
    OptionalInput,
    Option<T>
);

input_cell!(
    /// A trailing positional input collecting zero or more tokens.
    ///
    /// Example: `sum 1 2 3 4`.
    VariadicInput,
    Vec<T>
);

impl<T> RequiredInput<T> {
    /// Bound value; `None` only before a successful parse.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T> OptionalInput<T> {
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T> VariadicInput<T> {
    /// Every bound value, in command-line order.
    pub fn values(&self) -> &[T] {
        &self.value
    }
}

/// Tagged borrow of one declared argument cell.
pub enum Argument<'a> {
    Flag(&'a mut Flag),
    Option(&'a mut dyn ArgumentCell),
    RequiredInput(&'a mut dyn ArgumentCell),
    OptionalInput(&'a mut dyn ArgumentCell),
    VariadicInput(&'a mut dyn ArgumentCell),
}

impl Argument<'_> {
    pub fn kind(&self) -> ArgumentKind {
        match self {
            Argument::Flag(_) => ArgumentKind::Flag,
            Argument::Option(_) => ArgumentKind::Option,
            Argument::RequiredInput(_) => ArgumentKind::Input(InputKind::Required),
            Argument::OptionalInput(_) => ArgumentKind::Input(InputKind::Optional),
            Argument::VariadicInput(_) => ArgumentKind::Input(InputKind::Variadic),
        }
    }

    /// The value cell, for everything but flags.
    pub fn cell(&self) -> Option<&dyn ArgumentCell> {
        match self {
            Argument::Flag(_) => None,
            Argument::Option(cell)
            | Argument::RequiredInput(cell)
            | Argument::OptionalInput(cell)
            | Argument::VariadicInput(cell) => Some(&**cell),
        }
    }

    /// Name assigned during tree resolution, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Argument::Flag(flag) => flag.name(),
            _ => self.cell().and_then(|cell| cell.name()),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Argument::Flag(flag) => flag.description(),
            _ => self.cell().map_or("", |cell| cell.description()),
        }
    }

    pub fn short_name(&self) -> Option<char> {
        match self {
            Argument::Flag(flag) => flag.short_name(),
            _ => self.cell().and_then(|cell| cell.short_name()),
        }
    }

    pub fn assign_name(&mut self, name: &str) {
        match self {
            Argument::Flag(flag) => flag.assign_name(name),
            Argument::Option(cell)
            | Argument::RequiredInput(cell)
            | Argument::OptionalInput(cell)
            | Argument::VariadicInput(cell) => cell.assign_name(name),
        }
    }

    /// Binds a raw token. Flags ignore `raw` and become `true`.
    ///
    /// # Errors
    ///
    /// Propagates the cell's conversion error.
    pub fn bind(&mut self, raw: &str) -> Result<()> {
        match self {
            Argument::Flag(flag) => {
                flag.bind_flag();
                Ok(())
            }
            Argument::Option(cell)
            | Argument::RequiredInput(cell)
            | Argument::OptionalInput(cell)
            | Argument::VariadicInput(cell) => cell.bind(raw),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Argument::Flag(flag) => flag.reset(),
            Argument::Option(cell)
            | Argument::RequiredInput(cell)
            | Argument::OptionalInput(cell)
            | Argument::VariadicInput(cell) => cell.reset(),
        }
    }
}

impl<'a> From<&'a mut Flag> for Argument<'a> {
    fn from(flag: &'a mut Flag) -> Self {
        Argument::Flag(flag)
    }
}

impl<'a, T: ArgumentValue + Clone> From<&'a mut ValueOption<T>> for Argument<'a> {
    fn from(option: &'a mut ValueOption<T>) -> Self {
        Argument::Option(option)
    }
}

impl<'a, T: ArgumentValue> From<&'a mut RequiredInput<T>> for Argument<'a> {
    fn from(input: &'a mut RequiredInput<T>) -> Self {
        Argument::RequiredInput(input)
    }
}

impl<'a, T: ArgumentValue> From<&'a mut OptionalInput<T>> for Argument<'a> {
    fn from(input: &'a mut OptionalInput<T>) -> Self {
        Argument::OptionalInput(input)
    }
}

impl<'a, T: ArgumentValue> From<&'a mut VariadicInput<T>> for Argument<'a> {
    fn from(input: &'a mut VariadicInput<T>) -> Self {
        Argument::VariadicInput(input)
    }
}
