//===========================================================================//

macro_rules! invalid_data {
    ($e:expr) => {
        return Err($crate::error::IconError::Decode(($e).to_string()))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::IconError::Decode(format!($fmt, $($arg)+)))
    };
}

macro_rules! encode_error {
    ($e:expr) => {
        return Err($crate::error::IconError::Encode(($e).to_string()))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::IconError::Encode(format!($fmt, $($arg)+)))
    };
}

//===========================================================================//
