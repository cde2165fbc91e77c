mod midtrans;

pub use self::midtrans::MidtransSnapClient;
