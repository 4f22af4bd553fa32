//! Macro for the finite-domain answer enums.
//!
//! Every question offers a closed set of options with fixed wire spellings
//! (`"under-13"`, `"very-heavy"`, ...). `answer_options!` generates the enum
//! together with its serde renames, `ALL`, `as_str`, `Display`, `FromStr`
//! and the [`AnswerOption`](super::AnswerOption) impl used by normalization.
//!
//! ```ignore
//! answer_options! {
//!     /// Reported flow.
//!     FlowHeaviness, field = "flow_heaviness" {
//!         Light => "light",
//!         Heavy => "heavy",
//!     }
//! }
//! ```

macro_rules! answer_options {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in the order the question presents them.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire spelling of this option.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl $crate::domain::assessment::AnswerOption for $name {
            const FIELD: &'static str = $field;

            fn parse(value: &str) -> Option<Self> {
                match value {
                    $( $label => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::foundation::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::domain::assessment::AnswerOption>::parse(s).ok_or_else(|| {
                    $crate::domain::foundation::ValidationError::unknown_option($field, s)
                })
            }
        }
    };
}

pub(crate) use answer_options;
