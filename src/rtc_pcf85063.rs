// RTC driver for PCF85063A/PCF85063TP real-time clock chips.
// Datasheet: https://files.waveshare.com/wiki/common/Pcf85063atl1118-NdPQpTGE-loeW7GbZ7.pdf
//
// The chip is kept in UTC. `RtcClock` layers the local offset on top and serves
// as the `WallClock` for the faces.

use embedded_hal::i2c::I2c;
use log::warn;

use crate::clock::{apply_offset, datetime_is_valid, unix_to_datetime, DateTime, WallClock};

pub const PCF85063_ADDR: u8 = 0x51;

const REG_CONTROL_1: u8 = 0x00;
const REG_SECONDS: u8 = 0x04; // sec, min, hour, day, weekday, month, year
const CONTROL_1_STOP: u8 = 0x20;
const SECONDS_OS_FLAG: u8 = 0x80; // oscillator stopped since last write

#[derive(Debug, PartialEq, Eq)]
pub enum RtcError<E> {
    Bus(E),
    // Oscillator stopped at some point, the stored time can't be trusted
    ClockIntegrity,
    InvalidDate,
}

impl<E> From<E> for RtcError<E> {
    fn from(e: E) -> Self {
        RtcError::Bus(e)
    }
}

pub struct Pcf85063<I2C> {
    i2c: I2C,
}

impl<I2C, E> Pcf85063<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn into_inner(self) -> I2C {
        self.i2c
    }

    pub fn read_reg8(&mut self, reg: u8) -> Result<u8, E> {
        let mut buf = [0u8];
        self.i2c.write_read(PCF85063_ADDR, &[reg], &mut buf)?;
        Ok(buf[0])
    }

    pub fn write_reg8(&mut self, reg: u8, value: u8) -> Result<(), E> {
        self.i2c.write(PCF85063_ADDR, &[reg, value])
    }

    /// Read the stored time, rejecting it when the oscillator-stop flag is set.
    pub fn read_datetime(&mut self) -> Result<DateTime, RtcError<E>> {
        let mut buf = [0u8; 7];
        self.i2c.write_read(PCF85063_ADDR, &[REG_SECONDS], &mut buf)?;
        if buf[0] & SECONDS_OS_FLAG != 0 {
            return Err(RtcError::ClockIntegrity);
        }

        let dt = DateTime {
            year: 2000u16 + bcd_decode(buf[6]) as u16,
            month: bcd_decode(buf[5] & 0x1F),
            day: bcd_decode(buf[3] & 0x3F),
            hour: bcd_decode(buf[2] & 0x3F),
            minute: bcd_decode(buf[1] & 0x7F),
            second: bcd_decode(buf[0] & 0x7F),
        };
        if !datetime_is_valid(&dt) {
            return Err(RtcError::InvalidDate);
        }
        Ok(dt)
    }

    /// Write a new time. Writing the seconds register also clears the OS flag.
    pub fn set_datetime(&mut self, dt: &DateTime) -> Result<(), RtcError<E>> {
        if !datetime_is_valid(dt) || dt.year < 2000 || dt.year > 2099 {
            return Err(RtcError::InvalidDate);
        }
        let weekday = crate::epoch::iso_weekday(dt.year, dt.month, dt.day) % 7; // 0 = Sunday
        let data = [
            REG_SECONDS,
            bcd_encode(dt.second),
            bcd_encode(dt.minute),
            bcd_encode(dt.hour),
            bcd_encode(dt.day),
            weekday,
            bcd_encode(dt.month),
            bcd_encode((dt.year % 100) as u8),
        ];

        // Hold the prescaler while loading the new time
        let ctrl = self.read_reg8(REG_CONTROL_1)?;
        self.write_reg8(REG_CONTROL_1, ctrl | CONTROL_1_STOP)?;
        self.i2c.write(PCF85063_ADDR, &data)?;
        self.write_reg8(REG_CONTROL_1, ctrl & !CONTROL_1_STOP)?;
        Ok(())
    }
}

// BCD decode
fn bcd_decode(v: u8) -> u8 {
    (v & 0x0F) + ((v >> 4) * 10)
}

// BCD encode
fn bcd_encode(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}

/// PCF85063 used as the watch's wall clock.
///
/// A failed read keeps serving the last good reading so a glitch on the shared
/// I2C bus doesn't blank the faces.
pub struct RtcClock<I2C> {
    rtc: Pcf85063<I2C>,
    utc_offset_seconds: i32,
    last_good: DateTime,
}

impl<I2C, E> RtcClock<I2C>
where
    I2C: I2c<Error = E>,
    E: core::fmt::Debug,
{
    pub fn new(rtc: Pcf85063<I2C>, utc_offset_seconds: i32, fallback: DateTime) -> Self {
        Self { rtc, utc_offset_seconds, last_good: fallback }
    }

    pub fn rtc(&mut self) -> &mut Pcf85063<I2C> {
        &mut self.rtc
    }

    fn read_utc(&mut self) -> DateTime {
        match self.rtc.read_datetime() {
            Ok(dt) => self.last_good = dt,
            Err(e) => warn!("RTC read failed: {:?}", e),
        }
        self.last_good
    }
}

impl<I2C, E> WallClock for RtcClock<I2C>
where
    I2C: I2c<Error = E>,
    E: core::fmt::Debug,
{
    fn utc_now(&mut self) -> DateTime {
        self.read_utc()
    }

    fn local_now(&mut self) -> DateTime {
        let utc = self.read_utc();
        unix_to_datetime(apply_offset(utc.to_unix(), self.utc_offset_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation, SevenBitAddress};

    // Register file behind a fake bus: a write sets the pointer, reads auto-increment
    struct FakeBus {
        regs: [u8; 0x12],
        fail: bool,
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c<SevenBitAddress> for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            assert_eq!(address, PCF85063_ADDR);
            if self.fail {
                return Err(ErrorKind::Other);
            }
            let mut ptr = 0usize;
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        ptr = bytes[0] as usize;
                        for (i, b) in bytes[1..].iter().enumerate() {
                            self.regs[ptr + i] = *b;
                        }
                    }
                    Operation::Read(buf) => {
                        let n = buf.len();
                        buf.copy_from_slice(&self.regs[ptr..ptr + n]);
                    }
                }
            }
            Ok(())
        }
    }

    fn bus_with_time() -> FakeBus {
        let mut regs = [0u8; 0x12];
        // 2023-11-14 22:13:20
        regs[4..11].copy_from_slice(&[0x20, 0x13, 0x22, 0x14, 0x02, 0x11, 0x23]);
        FakeBus { regs, fail: false }
    }

    #[test]
    fn bcd_helpers() {
        assert_eq!(bcd_decode(0x59), 59);
        assert_eq!(bcd_encode(59), 0x59);
        assert_eq!(bcd_encode(7), 0x07);
    }

    #[test]
    fn reads_datetime() {
        let mut rtc = Pcf85063::new(bus_with_time());
        let dt = rtc.read_datetime().unwrap();
        assert_eq!(dt, DateTime::new(2023, 11, 14, 22, 13, 20));
        assert_eq!(dt.to_unix(), 1_700_000_000);
    }

    #[test]
    fn oscillator_stop_flag_is_rejected() {
        let mut bus = bus_with_time();
        bus.regs[4] |= SECONDS_OS_FLAG;
        let mut rtc = Pcf85063::new(bus);
        assert_eq!(rtc.read_datetime(), Err(RtcError::ClockIntegrity));
    }

    #[test]
    fn set_then_read_back() {
        let mut rtc = Pcf85063::new(bus_with_time());
        let dt = DateTime::new(2026, 10, 18, 9, 5, 1);
        rtc.set_datetime(&dt).unwrap();
        assert_eq!(rtc.read_datetime().unwrap(), dt);
        // weekday register holds Sunday as 0, prescaler released again
        let bus = rtc.into_inner();
        assert_eq!(bus.regs[8], 0);
        assert_eq!(bus.regs[0] & CONTROL_1_STOP, 0);
    }

    #[test]
    fn set_rejects_out_of_range_year() {
        let mut rtc = Pcf85063::new(bus_with_time());
        let dt = DateTime::new(2100, 1, 1, 0, 0, 0);
        assert_eq!(rtc.set_datetime(&dt), Err(RtcError::InvalidDate));
    }

    #[test]
    fn clock_applies_offset_and_keeps_last_good() {
        let fallback = DateTime::new(2020, 1, 1, 0, 0, 0);
        let mut clock = RtcClock::new(Pcf85063::new(bus_with_time()), 3600, fallback);
        assert_eq!(clock.utc_now().hour, 22);
        assert_eq!(clock.local_now().hour, 23);

        clock.rtc().i2c.fail = true;
        assert_eq!(clock.utc_now(), DateTime::new(2023, 11, 14, 22, 13, 20));
    }
}
