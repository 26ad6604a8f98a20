//! The bus interface to the display module.
//!
//! The SSD1306 distinguishes commands from pixel data with an in-band control byte rather than a
//! D/C wire, so the interface is a single `write` of an already-framed transmission. The framing
//! bytes themselves live in `command::consts`.

/// A connection over which framed transmissions can be sent to the display controller. Each call
/// is one bus transaction; the driver never splits a transmission across calls.
pub trait DisplayInterface {
    type Error: core::fmt::Debug;
    fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

pub mod i2c {
    //! The I2C interface, for modules with the controller strapped for I2C operation. The
    //! `embedded-hal` blocking write is used, which issues a START, the address, the payload, and
    //! a STOP for every transmission.

    use embedded_hal as hal;

    use super::DisplayInterface;

    /// An I2C interface to the display controller.
    pub struct I2cInterface<I2C> {
        /// The I2C master device connected to the SSD1306.
        i2c: I2C,
        /// The module's 7-bit address, `consts::ADDR_DEFAULT` or `consts::ADDR_ALTERNATE`
        /// depending on how the SA0 pin is strapped.
        addr: u8,
    }

    impl<I2C> I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write,
    {
        /// Create a new I2C interface to communicate with the display driver. `i2c` is the I2C
        /// master device, and `addr` is the module's 7-bit address.
        pub fn new(i2c: I2C, addr: u8) -> Self {
            Self { i2c, addr }
        }

        /// Release the underlying I2C peripheral.
        pub fn release(self) -> I2C {
            self.i2c
        }
    }

    impl<I2C> DisplayInterface for I2cInterface<I2C>
    where
        I2C: hal::blocking::i2c::Write,
        I2C::Error: core::fmt::Debug,
    {
        type Error = I2C::Error;

        fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.i2c.write(self.addr, buf)
        }
    }
}

#[cfg(test)]
pub mod test_spy {
    //! An interface for use in unit tests to spy on whatever was sent to it.

    use super::DisplayInterface;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::vec::Vec;

    /// Records every transmission, one `Vec<u8>` per bus transaction, framing byte included.
    pub struct TestSpyInterface {
        sent: Rc<RefCell<Vec<Vec<u8>>>>,
        fail_writes: Rc<Cell<bool>>,
    }

    impl TestSpyInterface {
        pub fn new() -> Self {
            TestSpyInterface {
                sent: Rc::new(RefCell::new(Vec::new())),
                fail_writes: Rc::new(Cell::new(false)),
            }
        }

        /// Make a handle sharing this spy's transmission log, so one end can be moved into a
        /// `Display` while the test keeps the other for checking.
        pub fn split(&self) -> Self {
            TestSpyInterface {
                sent: self.sent.clone(),
                fail_writes: self.fail_writes.clone(),
            }
        }

        pub fn clear(&self) {
            self.sent.borrow_mut().clear();
        }

        /// When set, every write still gets recorded but reports a bus error.
        pub fn set_fail_writes(&self, fail: bool) {
            self.fail_writes.set(fail);
        }

        pub fn sent(&self) -> Vec<Vec<u8>> {
            self.sent.borrow().clone()
        }

        pub fn check_multi(&self, expect: &[&[u8]]) {
            let expect_vecs: Vec<Vec<u8>> = expect.iter().map(|e| e.to_vec()).collect();
            assert_eq!(*self.sent.borrow(), expect_vecs);
        }
    }

    impl DisplayInterface for TestSpyInterface {
        type Error = ();

        fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.sent.borrow_mut().push(buf.to_vec());
            if self.fail_writes.get() {
                Err(())
            } else {
                Ok(())
            }
        }
    }
}
