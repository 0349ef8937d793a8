#![warn(missing_docs)]
//! `toggle-rules` - declarative rule files for `toggle-core`.
//!
//! Rules are written in YAML and compiled to regex-backed matchers and mappers:
//!
//! ```yaml
//! variables:
//!   c_ext: '(c|cc|cpp)'
//! rules:
//!   - name: c-header
//!     match: '^(.*)\.{{c_ext}}$'
//!     map: '$1.h'
//!   - name: c-test
//!     match: '\.c$'
//!     map:
//!       - '_test.c'
//!       - { pattern: '^(.*)/src/(.*)\.c$', replace: '${1}/tests/${2}_test.c' }
//! ```
//!
//! - `match` is tested against the path's string form.
//! - A string `map` entry is a replacement template for the first `match` hit.
//! - A `{ pattern, replace }` entry replaces the first hit of its own regex and fails if the
//!   pattern does not match.
//! - `{{name}}` in any pattern is replaced by the `variables` entry of that name.

mod compiler;
mod definition;
mod error;
mod file;

pub use compiler::{CompiledRule, RegexMapper, RegexMatcher, compile_rules};
pub use definition::{MapDefinition, MapperDefinition, RuleDefinition, RuleFileDefinition};
pub use error::RuleFileError;
pub use file::{CONFIG_FILE_NAME, RuleFile};
