pub(crate) mod candles;
pub(crate) mod layout;
pub(crate) mod scale;
