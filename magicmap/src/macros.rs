//! Literal-style constructor macros.

/// Builds a [`Value`](crate::Value) from a literal-like expression.
///
/// Braces build wrapped maps, brackets build lists, `null`/`true`/`false`
/// mean what they say, and anything else goes through
/// [`Value::from`](crate::Value).
///
/// ```
/// use magicmap::value;
///
/// let v = value!({
///     "name": "Alice",
///     "scores": [1, 2, 3],
///     "nickname": null,
/// });
/// assert_eq!(v.attr("scores").as_list().unwrap().len(), 3);
/// ```
#[macro_export]
macro_rules! value {
    ($($tt:tt)+) => {
        $crate::value_internal!($($tt)+)
    };
}

/// Builds a [`MagicMap`](crate::MagicMap) from `"key": value` pairs.
///
/// Values use the same grammar as [`value!`]; nested braces are wrapped
/// maps, so the whole literal is hooked by construction.
///
/// ```
/// use magicmap::magic;
///
/// let md = magic! {
///     "user": { "name": "Alice" },
/// };
/// assert_eq!(md.attr("user").attr("name").as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! magic {
    () => {
        $crate::MagicMap::new()
    };
    ( $($tt:tt)+ ) => {{
        let mut pairs: ::std::vec::Vec<($crate::Key, $crate::Value)> = ::std::vec::Vec::new();
        $crate::value_internal!(@object pairs () ($($tt)+) ($($tt)+));
        $crate::MagicMap::from_pairs(pairs)
    }};
}

// tt-muncher behind `value!` and `magic!`; the @array/@object states carry
// the elements accumulated so far and the tokens still to consume
#[macro_export]
#[doc(hidden)]
macro_rules! value_internal {
    //////////////////////////////////////////////////////////////////////
    // @array: accumulate a ::std::vec::Vec<Value>
    //////////////////////////////////////////////////////////////////////

    (@array [$($elems:expr,)*]) => {
        ::std::vec![$($elems,)*]
    };
    (@array [$($elems:expr),*]) => {
        ::std::vec![$($elems),*]
    };
    (@array [$($elems:expr,)*] null $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!(null)] $($rest)*)
    };
    (@array [$($elems:expr,)*] true $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!(true)] $($rest)*)
    };
    (@array [$($elems:expr,)*] false $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!(false)] $($rest)*)
    };
    (@array [$($elems:expr,)*] [$($array:tt)*] $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!([$($array)*])] $($rest)*)
    };
    (@array [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!({$($map)*})] $($rest)*)
    };
    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!($next),] $($rest)*)
    };
    (@array [$($elems:expr,)*] $last:expr) => {
        $crate::value_internal!(@array [$($elems,)* $crate::value_internal!($last)])
    };
    (@array [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::value_internal!(@array [$($elems,)*] $($rest)*)
    };
    (@array [$($elems:expr),*] $unexpected:tt $($rest:tt)*) => {
        $crate::value_unexpected!($unexpected)
    };

    //////////////////////////////////////////////////////////////////////
    // @object: accumulate (Key, Value) pairs into $pairs
    //////////////////////////////////////////////////////////////////////

    (@object $pairs:ident () () ()) => {};
    (@object $pairs:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        $pairs.push((($($key)+).into(), $value));
        $crate::value_internal!(@object $pairs () ($($rest)*) ($($rest)*));
    };
    (@object $pairs:ident [$($key:tt)+] ($value:expr) $unexpected:tt $($rest:tt)*) => {
        $crate::value_unexpected!($unexpected);
    };
    (@object $pairs:ident [$($key:tt)+] ($value:expr)) => {
        $pairs.push((($($key)+).into(), $value));
    };
    (@object $pairs:ident ($($key:tt)+) (: null $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $pairs [$($key)+] ($crate::value_internal!(null)) $($rest)*);
    };
    (@object $pairs:ident ($($key:tt)+) (: true $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $pairs [$($key)+] ($crate::value_internal!(true)) $($rest)*);
    };
    (@object $pairs:ident ($($key:tt)+) (: false $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $pairs [$($key)+] ($crate::value_internal!(false)) $($rest)*);
    };
    (@object $pairs:ident ($($key:tt)+) (: [$($array:tt)*] $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $pairs [$($key)+] ($crate::value_internal!([$($array)*])) $($rest)*);
    };
    (@object $pairs:ident ($($key:tt)+) (: {$($map:tt)*} $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $pairs [$($key)+] ($crate::value_internal!({$($map)*})) $($rest)*);
    };
    (@object $pairs:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $pairs [$($key)+] ($crate::value_internal!($value)) , $($rest)*);
    };
    (@object $pairs:ident ($($key:tt)+) (: $value:expr) $copy:tt) => {
        $crate::value_internal!(@object $pairs [$($key)+] ($crate::value_internal!($value)));
    };
    (@object $pairs:ident ($($key:tt)+) (:) $copy:tt) => {
        // missing value
        $crate::value_internal!();
    };
    (@object $pairs:ident ($($key:tt)+) () $copy:tt) => {
        // missing colon
        $crate::value_internal!();
    };
    (@object $pairs:ident () (: $($rest:tt)*) ($colon:tt $($copy:tt)*)) => {
        $crate::value_unexpected!($colon);
    };
    (@object $pairs:ident ($($key:tt)*) (, $($rest:tt)*) ($comma:tt $($copy:tt)*)) => {
        $crate::value_unexpected!($comma);
    };
    (@object $pairs:ident () (($key:expr) : $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $pairs ($key) (: $($rest)*) (: $($rest)*));
    };
    (@object $pairs:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        $crate::value_internal!(@object $pairs ($($key)* $tt) ($($rest)*) ($($rest)*));
    };

    //////////////////////////////////////////////////////////////////////
    // primary
    //////////////////////////////////////////////////////////////////////

    (null) => {
        $crate::Value::Null
    };
    (true) => {
        $crate::Value::Bool(true)
    };
    (false) => {
        $crate::Value::Bool(false)
    };
    ([]) => {
        $crate::Value::List($crate::List::new())
    };
    ([ $($tt:tt)+ ]) => {
        $crate::Value::List($crate::List::from_vec($crate::value_internal!(@array [] $($tt)+)))
    };
    ({}) => {
        $crate::Value::Magic($crate::MagicMap::new())
    };
    ({ $($tt:tt)+ }) => {
        $crate::Value::Magic($crate::magic! { $($tt)+ })
    };
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! value_unexpected {
    () => {};
}
