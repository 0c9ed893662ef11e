/// Builds a [`TimeStamp`](crate::time::TimeStamp) from a literal like
/// `time_stamp!(09:30)`, rejecting out of range values at compile time.
#[macro_export]
macro_rules! time_stamp {
    ( $hour:literal : $minute:literal ) => {{
        $crate::static_assertions::const_assert!($hour < 24);
        $crate::static_assertions::const_assert!($minute < 60);

        match $crate::time::TimeStamp::new($hour, $minute) {
            ::core::result::Result::Ok(stamp) => stamp,
            ::core::result::Result::Err(_) => ::core::unreachable!(),
        }
    }};
}
