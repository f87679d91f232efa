mod rgbdistance;

pub use rgbdistance::RgbDistance;
