/// Anything that can produce a raw reading of the ladder's analog pin.
///
/// Configuring the pin and the converter is left to whoever builds the source.
pub trait AnalogSource {
    type Error;

    /// Takes one reading in `0..analog_resolution`.
    fn read(&mut self) -> Result<u16, Self::Error>;
}

impl<T: AnalogSource + ?Sized> AnalogSource for &mut T {
    type Error = T::Error;

    fn read(&mut self) -> Result<u16, Self::Error> {
        (**self).read()
    }
}
