/// Management SoC services provided by the vendor firmware library.
///
/// None of these report a result; they either take effect or the chip is
/// already beyond saving.
pub trait Firmware {
    /// Turns the housekeeping SPI on or off. Off keeps it from contending for
    /// the shared bus.
    fn enable_hk_spi(&mut self, enable: bool);

    /// Applies the default pad configuration.
    fn load_gpio_configs(&mut self);

    /// Opens the management-to-user-project Wishbone interface.
    fn enable_user_interface(&mut self);
}
