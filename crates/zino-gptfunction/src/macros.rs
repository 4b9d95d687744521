//! Macros for declaring GPT functions and enumerated parameters.

/// Declares an enumeration whose variants are represented by string values.
///
/// The enumeration is described as a string restricted to its values in schemas,
/// and it is (de)serialized through the same values. Returned from a callable,
/// it is rendered as its value.
///
/// # Example
/// ```
/// use zino_gptfunction::{string_enum, TypeHint};
///
/// string_enum! {
///     /// Fruits in stock.
///     pub enum Fruit {
///         Orange = "orange",
///         Apple = "apple",
///     }
/// }
///
/// assert_eq!(Fruit::Apple.to_string(), "apple");
/// assert_eq!("orange".parse::<Fruit>().unwrap(), Fruit::Orange);
/// assert_eq!(Fruit::type_hint().to_string(), "enum Fruit");
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            /// String values of the variants in declaration order.
            $vis const VALUES: &'static [&'static str] = &[$($value),+];

            /// Returns the string value.
            $vis fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::FunctionError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($value => ::std::result::Result::Ok(Self::$variant),)+
                    _ => ::std::result::Result::Err($crate::FunctionError::InvalidArguments(
                        ::std::format!("`{}` is not a value of `{}`", s, ::std::stringify!($name)),
                    )),
                }
            }
        }

        impl $crate::IntoText for $name {
            #[inline]
            fn into_text(self) -> $crate::TextOutput {
                $crate::TextOutput::Rendered(::std::string::ToString::to_string(self.as_str()))
            }
        }

        impl $crate::TypeHint for $name {
            fn type_hint() -> $crate::DeclaredType {
                $crate::DeclaredType::string_enum(
                    ::std::stringify!($name),
                    Self::VALUES.iter().copied(),
                )
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let s = <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                s.parse()
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}

/// Declares a function and a constructor of its [`GptFunction`](crate::GptFunction) adapter.
///
/// The `///` documentation becomes the docstring, and the parameter list becomes
/// the signature. The generated fn takes no arguments and returns the adapter,
/// whose callable takes the parameters as a tuple.
///
/// # Example
/// ```
/// use zino_gptfunction::gptfunction;
///
/// gptfunction! {
///     /// Adds two numbers.
///     ///
///     /// :param a: First number.
///     /// :param b: Second number.
///     fn add(a: i64, b: i64) -> i64 {
///         a + b
///     }
/// }
///
/// let add = add();
/// assert_eq!(add.call((2, 3)), "5");
/// assert_eq!(add.description(), "Adds two numbers.");
/// ```
#[macro_export]
macro_rules! gptfunction {
    (@ret) => { () };
    (@ret $ret:ty) => { $ret };
    (
        $(#[doc = $doc:literal])*
        $vis:vis fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)? $body:block
    ) => {
        $(#[doc = $doc])*
        $vis fn $name() -> $crate::GptFunction<
            fn(($($ty,)*)) -> $crate::gptfunction!(@ret $($ret)?),
            ($($ty,)*),
        > {
            fn inner($($arg: $ty),*) -> $crate::gptfunction!(@ret $($ret)?) $body

            let signature = $crate::Signature::new(::std::stringify!($name))
                .doc(::std::concat!($($doc, "\n",)*))
                $(.typed::<$ty>(::std::stringify!($arg)))*;
            let function: fn(($($ty,)*)) -> $crate::gptfunction!(@ret $($ret)?) =
                |($($arg,)*)| inner($($arg),*);
            $crate::GptFunction::new(signature, function)
        }
    };
}

/// Registers GPT functions declared with [`gptfunction!`](crate::gptfunction).
///
/// Returns early with the registry error if a name is already taken.
#[macro_export]
macro_rules! register_function {
    ($registry:expr, $($name:ident),+ $(,)?) => {
        $($registry.register($name())?;)+
    };
}
