//! Platform-agnostic MMA8452Q accelerometer driver which uses I2C via
//! [embedded-hal] and implements the [`Accelerometer` trait][trait]
//! from the `accelerometer` crate.
//!
//! The driver owns the bus handle together with the last acquired sample
//! and orientation. [`Mma8452q::init`] programs the fixed power-on
//! configuration and must run before any acquisition.
//!
//! [embedded-hal]: https://docs.rs/embedded-hal
//! [trait]: https://docs.rs/accelerometer/latest/accelerometer/trait.Accelerometer.html
//!

#![deny(missing_docs)]
#![deny(warnings)]
#![no_std]
#![forbid(unsafe_code)]

mod reg;

use core::fmt::Debug;

pub use accelerometer::vector::{F32x3, I16x3};
pub use accelerometer::{Accelerometer, Error, ErrorKind, RawAccelerometer};
use embedded_hal as hal;
use hal::i2c::{I2c, Operation};
use num_traits::FromPrimitive;

use crate::reg::*;
pub use crate::reg::{Bafro, FullScale, Lapo, Odr, Register, SysMode, DEVICE_ID};

/// Status byte reported by [`init_status`] when the identity check fails
pub const INIT_WRONG_DEVICE: u8 = 0xFF;

/// Possible slave addresses
pub enum SlaveAddr {
    /// Default slave address (`SA0` low)
    Default,
    /// Alternative slave address providing bit value for `SA0`
    Alternative(bool),
}

impl SlaveAddr {
    fn addr(self) -> u8 {
        match self {
            SlaveAddr::Default => I2C_SAD,
            SlaveAddr::Alternative(sa0) => I2C_SAD | sa0 as u8,
        }
    }
}

/// Data status structure,
/// decoded from STATUS register
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataStatus {
    /// ZYXOW bit
    pub zyxow: bool,
    /// (XOW, YOW, ZOW) bits
    pub xyzow: (bool, bool, bool),
    /// ZYXDR bit
    pub zyxdr: bool,
    /// (XDR, YDR, ZDR) bits
    pub xyzdr: (bool, bool, bool),
}

/// Interrupt source flags,
/// decoded from INT_SOURCE register
#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntSource {
    /// Auto-sleep/wake
    pub aslp: bool,
    /// Transient
    pub trans: bool,
    /// Landscape/portrait orientation
    pub lndprt: bool,
    /// Pulse
    pub pulse: bool,
    /// Freefall/motion
    pub ff_mt: bool,
    /// Data ready
    pub drdy: bool,
}

/// Orientation decoded from PL_STATUS register
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    /// Portrait/landscape (`LAPO`)
    pub lapo: Lapo,
    /// Back/front (`BAFRO`)
    pub bafro: Bafro,
    /// Z-tilt angle lockout (`LO`)
    pub z_lockout: bool,
    /// Orientation changed since the last read (`NEWLM`)
    pub changed: bool,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            lapo: Lapo::PortraitUp,
            bafro: Bafro::Front,
            z_lockout: false,
            changed: false,
        }
    }
}

impl From<u8> for Orientation {
    fn from(reg: u8) -> Self {
        Self {
            lapo: Lapo::from_u8((reg & LAPO_MASK) >> 1).unwrap_or(Lapo::PortraitUp),
            bafro: if (reg & BAFRO) != 0 {
                Bafro::Back
            } else {
                Bafro::Front
            },
            z_lockout: (reg & LO) != 0,
            changed: (reg & NEWLM) != 0,
        }
    }
}

/// `MMA8452Q` driver
pub struct Mma8452q<I2C> {
    /// The concrete I²C device implementation
    i2c: I2C,
    /// The I²C device slave address
    addr: u8,
    /// Full-scale written by `init`
    fs: FullScale,
    /// 8-bit samples (`F_READ`) written by `init`
    fast_read: bool,
    /// Last raw 12-bit sample fields
    raw: [u16; 3],
    /// Last decoded sample in g
    accel: F32x3,
    /// Last orientation
    orientation: Orientation,
}

/// Collapse an [`Mma8452q::init`] outcome into a single status byte:
/// the count of failed configuration writes, or [`INIT_WRONG_DEVICE`].
///
/// Every `Err` maps to [`INIT_WRONG_DEVICE`]: a `WHO_AM_I` mismatch
/// ([`ErrorKind::Device`]) as well as a bus failure while reading
/// `WHO_AM_I` ([`ErrorKind::Bus`]), since the identity is unconfirmed in
/// both cases and no configuration was written.
pub fn init_status<E>(res: &Result<u8, Error<E>>) -> u8
where
    E: Debug,
{
    match res {
        Ok(failed) => *failed,
        Err(_) => INIT_WRONG_DEVICE,
    }
}

impl<I2C, E> Mma8452q<I2C>
where
    I2C: I2c<Error = E>,
    E: Debug,
{
    /// Create a new `MMA8452Q` driver from the given `I2C` peripheral,
    /// no bus traffic happens until [`init`](Self::init)
    pub fn new(i2c: I2C, addr: SlaveAddr) -> Self {
        Self {
            i2c,
            addr: addr.addr(),
            fs: FullScale::G2,
            fast_read: false,
            raw: [0; 3],
            accel: F32x3::new(0.0, 0.0, 0.0),
            orientation: Orientation::default(),
        }
    }

    /// Destroy driver instance, return `I2C` bus instance
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// Check the device identity and program the default configuration.
    ///
    /// Returns the number of configuration writes that failed; `Ok(0)`
    /// means the device is fully configured. Every write is attempted even
    /// when an earlier one fails. A `WHO_AM_I` mismatch aborts before any
    /// write with [`ErrorKind::Device`].
    pub fn init(&mut self) -> Result<u8, Error<E>> {
        self.fs = FullScale::G2;
        self.fast_read = false;
        self.raw = [0; 3];
        self.accel = F32x3::new(0.0, 0.0, 0.0);
        self.orientation = Orientation::default();

        // Ensure we have the correct device ID
        let id = self.get_device_id()?;
        if id != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("MMA8452Q: unexpected WHO_AM_I {=u8:#x}", id);
            ErrorKind::Device.err()?;
        }

        let mut failed = 0;

        failed += self.init_write(Register::XYZ_DATA_CFG, XYZ_DATA_CFG_DEFAULT);
        self.fs = FullScale::from_u8(XYZ_DATA_CFG_DEFAULT & FS_MASK).unwrap_or(FullScale::G2);

        failed += self.init_write(Register::PL_CFG, PL_CFG_DEFAULT);
        failed += self.init_write(Register::PL_COUNT, PL_COUNT_DEFAULT);
        failed += self.init_write(Register::ASLP_COUNT, ASLP_COUNT_DEFAULT);

        failed += self.init_write(Register::CTRL_REG1, CTRL_REG1_DEFAULT);
        self.fast_read = (CTRL_REG1_DEFAULT & F_READ) != 0;

        failed += self.init_write(Register::CTRL_REG2, CTRL_REG2_DEFAULT);
        failed += self.init_write(Register::CTRL_REG3, CTRL_REG3_DEFAULT);
        failed += self.init_write(Register::CTRL_REG4, CTRL_REG4_DEFAULT);
        failed += self.init_write(Register::CTRL_REG5, CTRL_REG5_DEFAULT);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "MMA8452Q: fs={}, fast_read={}, failed writes={=u8}",
            self.fs,
            self.fast_read,
            failed
        );

        Ok(failed)
    }

    /// Single configuration write, counted as 1 on failure
    fn init_write(&mut self, reg: Register, val: u8) -> u8 {
        match self.write_reg(reg, val) {
            Ok(()) => 0,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("MMA8452Q: write {} failed", reg);
                1
            }
        }
    }

    /// `WHO_AM_I` register
    pub fn get_device_id(&mut self) -> Result<u8, Error<E>> {
        self.read_reg(Register::WHO_AM_I).map_err(Into::into)
    }

    /// Full-scale in effect for decoding
    pub fn full_scale(&self) -> FullScale {
        self.fs
    }

    /// 8-bit sample mode in effect for decoding
    pub fn is_fast_read(&self) -> bool {
        self.fast_read
    }

    /// Last raw sample fields (12-bit two's complement)
    pub fn raw(&self) -> [u16; 3] {
        self.raw
    }

    /// Last decoded sample in g
    pub fn accel(&self) -> F32x3 {
        self.accel
    }

    /// Last decoded orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Acquire a sample,
    /// `OUT_X_MSB` .. `OUT_Z_LSB` (3 bytes in fast-read mode)
    pub fn read_accel(&mut self) -> Result<(), Error<E>> {
        let raw = if self.fast_read {
            let mut buf = [0u8; 3];
            self.read_regs(Register::OUT_X_MSB, &mut buf)?;
            [
                field_from_fast(buf[0]),
                field_from_fast(buf[1]),
                field_from_fast(buf[2]),
            ]
        } else {
            let mut buf = [0u8; 6];
            self.read_regs(Register::OUT_X_MSB, &mut buf)?;
            [
                field_from_pair(buf[0], buf[1]),
                field_from_pair(buf[2], buf[3]),
                field_from_pair(buf[4], buf[5]),
            ]
        };

        let accel = F32x3::new(
            self.fs.decode(raw[0], self.fast_read),
            self.fs.decode(raw[1], self.fast_read),
            self.fs.decode(raw[2], self.fast_read),
        );
        self.raw = raw;
        self.accel = accel;
        Ok(())
    }

    /// Acquire orientation,
    /// `PL_STATUS`: `NEWLM`, `LO`, `LAPO`, `BAFRO`
    pub fn read_orientation(&mut self) -> Result<(), Error<E>> {
        let reg = self.read_reg(Register::PL_STATUS)?;
        self.orientation = reg.into();
        Ok(())
    }

    /// Data status,
    /// `STATUS`: as
    /// DataStatus {zyxow: `ZYXOW`, xyzow: (`XOW`, `YOW`, `ZOW`), zyxdr: `ZYXDR`, xyzdr: (`XDR`, `YDR`, `ZDR`)}
    pub fn get_status(&mut self) -> Result<DataStatus, Error<E>> {
        let reg = self.read_reg(Register::STATUS)?;
        Ok(DataStatus {
            zyxow: (reg & ZYXOW) != 0,
            xyzow: ((reg & XOW) != 0, (reg & YOW) != 0, (reg & ZOW) != 0),
            zyxdr: (reg & ZYXDR) != 0,
            xyzdr: ((reg & XDR) != 0, (reg & YDR) != 0, (reg & ZDR) != 0),
        })
    }

    /// System mode,
    /// `SYSMOD`: `SYSMOD`
    pub fn get_sysmod(&mut self) -> Result<SysMode, Error<E>> {
        let reg = self.read_reg(Register::SYSMOD)?;
        match SysMode::from_u8(reg & SYSMOD_MASK) {
            Some(mode) => Ok(mode),
            None => Err(Error::new(ErrorKind::Device)),
        }
    }

    /// Interrupt source,
    /// `INT_SOURCE`
    pub fn get_int_source(&mut self) -> Result<IntSource, Error<E>> {
        let reg = self.read_reg(Register::INT_SOURCE)?;
        Ok(IntSource {
            aslp: (reg & SRC_ASLP) != 0,
            trans: (reg & SRC_TRANS) != 0,
            lndprt: (reg & SRC_LNDPRT) != 0,
            pulse: (reg & SRC_PULSE) != 0,
            ff_mt: (reg & SRC_FF_MT) != 0,
            drdy: (reg & SRC_DRDY) != 0,
        })
    }

    /// Offset correction in 2 mg steps,
    /// `OFF_X`, `OFF_Y`, `OFF_Z`
    pub fn set_offset(&mut self, (x, y, z): (i8, i8, i8)) -> Result<(), Error<E>> {
        self.write_regs(Register::OFF_X, &[x as u8, y as u8, z as u8])?;
        Ok(())
    }

    /// Offset correction,
    /// `OFF_X`, `OFF_Y`, `OFF_Z`
    pub fn get_offset(&mut self) -> Result<(i8, i8, i8), Error<E>> {
        let mut buf = [0u8; 3];
        self.read_regs(Register::OFF_X, &mut buf)?;
        Ok((buf[0] as i8, buf[1] as i8, buf[2] as i8))
    }

    /// Software reset,
    /// `CTRL_REG2`: `RST`.
    ///
    /// The device returns to its power-on state. The decoding parameters
    /// fall back to ±2 g, 12-bit and stay invalid for acquisition until
    /// [`init`](Self::init) runs again.
    pub fn reset(&mut self) -> Result<(), Error<E>> {
        self.write_reg(Register::CTRL_REG2, RST)?;
        self.fs = FullScale::G2;
        self.fast_read = false;
        Ok(())
    }

    /// Read a single register
    #[inline]
    pub fn read_reg(&mut self, reg: Register) -> Result<u8, E> {
        let mut buf = [0u8];
        self.i2c.write_read(self.addr, &[reg.addr()], &mut buf)?;
        Ok(buf[0])
    }

    /// Read consecutive registers starting at `reg` into `buffer`
    #[inline]
    pub fn read_regs(&mut self, reg: Register, buffer: &mut [u8]) -> Result<(), E> {
        self.i2c.write_read(self.addr, &[reg.addr()], buffer)
    }

    /// Write a single register
    #[inline]
    pub fn write_reg(&mut self, reg: Register, val: u8) -> Result<(), E> {
        self.i2c.write(self.addr, &[reg.addr(), val])
    }

    /// Write consecutive registers starting at `reg` from `data`
    #[inline]
    pub fn write_regs(&mut self, reg: Register, data: &[u8]) -> Result<(), E> {
        // adjacent writes go out without a restart
        self.i2c.transaction(
            self.addr,
            &mut [Operation::Write(&[reg.addr()]), Operation::Write(data)],
        )
    }
}

impl<I2C, E> RawAccelerometer<I16x3> for Mma8452q<I2C>
where
    I2C: I2c<Error = E>,
    E: Debug,
{
    type Error = E;

    /// Get acceleration reading from the accelerometer,
    /// signed 12-bit counts
    fn accel_raw(&mut self) -> Result<I16x3, Error<E>> {
        self.read_accel()?;

        Ok(I16x3::new(
            sign_extend_12(self.raw[0]),
            sign_extend_12(self.raw[1]),
            sign_extend_12(self.raw[2]),
        ))
    }
}

impl<I2C, E> Accelerometer for Mma8452q<I2C>
where
    I2C: I2c<Error = E>,
    E: Debug,
{
    type Error = E;

    /// Get normalized ±g reading from the accelerometer
    fn accel_norm(&mut self) -> Result<F32x3, Error<E>> {
        self.read_accel()?;
        Ok(self.accel)
    }

    /// Get sample rate of accelerometer in Hz
    fn sample_rate(&mut self) -> Result<f32, Error<Self::Error>> {
        let creg1 = self.read_reg(Register::CTRL_REG1)?;
        let rate = match Odr::from_u8((creg1 & DR_MASK) >> 3) {
            Some(odr) => odr.hz(),
            None => 0.0,
        };
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use embedded_hal::i2c::ErrorKind as BusError;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    use super::*;

    const DEV_ADDR: u8 = 0b001_1100;

    fn fast_read_dev(trans: &[I2cTrans]) -> Mma8452q<I2cMock> {
        let mut dev = Mma8452q::new(I2cMock::new(trans), SlaveAddr::Default);
        dev.fs = FullScale::G8;
        dev.fast_read = true;
        dev
    }

    #[test]
    fn read_accel_fast() {
        let trans = [
            // read OUT_X_MSB, OUT_Y_MSB, OUT_Z_MSB
            I2cTrans::write_read(DEV_ADDR, vec![0x01], vec![0x7F, 0x80, 0xFF]),
        ];
        let mut dev = fast_read_dev(&trans);

        dev.read_accel().unwrap();
        assert_eq!(dev.raw(), [0x07F, 0xF80, 0xFFF]);

        let accel = dev.accel();
        assert_eq!((accel.x, accel.y, accel.z), (7.9375, -8.0, -0.0625));

        dev.destroy().done();
    }

    #[test]
    fn read_accel_fast_error_keeps_state() {
        let trans = [
            I2cTrans::write_read(DEV_ADDR, vec![0x01], vec![0x10, 0xF0, 0x01]),
            I2cTrans::write_read(DEV_ADDR, vec![0x01], vec![0x00; 3]).with_error(BusError::Other),
        ];
        let mut dev = fast_read_dev(&trans);

        dev.read_accel().unwrap();
        assert_eq!(dev.raw(), [0x010, 0xFF0, 0x001]);
        let accel = dev.accel();
        assert_eq!((accel.x, accel.y, accel.z), (1.0, -1.0, 0.0625));

        let err = dev.read_accel().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bus);

        assert_eq!(dev.raw(), [0x010, 0xFF0, 0x001]);
        let after = dev.accel();
        assert_eq!(after.x.to_bits(), accel.x.to_bits());
        assert_eq!(after.y.to_bits(), accel.y.to_bits());
        assert_eq!(after.z.to_bits(), accel.z.to_bits());
        assert_eq!(dev.full_scale(), FullScale::G8);
        assert!(dev.is_fast_read());

        dev.destroy().done();
    }
}
