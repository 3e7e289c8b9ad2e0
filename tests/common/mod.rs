#![allow(dead_code)]

pub use mma8452q::{Mma8452q, SlaveAddr};

pub use embedded_hal::i2c::ErrorKind as BusError;
use embedded_hal_mock as hal;
pub use hal::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

pub const DEV_ADDR: u8 = 0b001_1100;

pub fn trans_who_am_i() -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![0x0D], vec![0x2A])
}

/// Configuration writes issued by `init`, in order
pub fn trans_init_writes() -> Vec<I2cTrans> {
    vec![
        // XYZ_DATA_CFG
        I2cTrans::write(DEV_ADDR, vec![0x0E, 0x02]),
        // PL_CFG
        I2cTrans::write(DEV_ADDR, vec![0x11, 0xC0]),
        // PL_COUNT
        I2cTrans::write(DEV_ADDR, vec![0x12, 0x00]),
        // ASLP_COUNT
        I2cTrans::write(DEV_ADDR, vec![0x29, 0x0F]),
        // CTRL_REG1
        I2cTrans::write(DEV_ADDR, vec![0x2A, 0xD9]),
        // CTRL_REG2
        I2cTrans::write(DEV_ADDR, vec![0x2B, 0x04]),
        // CTRL_REG3
        I2cTrans::write(DEV_ADDR, vec![0x2C, 0x22]),
        // CTRL_REG4
        I2cTrans::write(DEV_ADDR, vec![0x2D, 0x81]),
        // CTRL_REG5
        I2cTrans::write(DEV_ADDR, vec![0x2E, 0x10]),
    ]
}

pub fn trans_init() -> Vec<I2cTrans> {
    let mut trans = vec![trans_who_am_i()];
    trans.extend(trans_init_writes());
    trans
}
