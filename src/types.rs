//! NewType wrappers for strong typing throughout the catalog service.
//!
//! These types prevent accidental mixing of semantically different strings
//! (e.g., passing a plaintext password where a stored digest is expected).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate a NewType wrapper with standard trait implementations.
macro_rules! newtype_string {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner String.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

newtype_string!(
    /// Account name chosen at registration (e.g., "moviefan42").
    ///
    /// This is both the login identifier and the path segment of
    /// profile routes, so ownership checks compare it byte for byte.
    /// Uniqueness is enforced by a database index.
    Username
);

newtype_string!(
    /// Bcrypt digest of a password as stored in the `user` table.
    ///
    /// The digest embeds its own salt and cost factor. Plaintext
    /// passwords never enter this type; conversion happens only
    /// through the password hasher.
    PasswordDigest
);

newtype_string!(
    /// Movie title as stored in the catalog (e.g., "The Godfather").
    ///
    /// Titles are unique within the catalog and double as the lookup
    /// key for the single-movie endpoint.
    MovieTitle
);

newtype_string!(
    /// Genre name such as "Drama" or "Science Fiction".
    GenreName
);

newtype_string!(
    /// Director name as credited on a movie (e.g., "Sofia Coppola").
    DirectorName
);
