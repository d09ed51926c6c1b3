//! Control panel port — mirroring settings values to the host UI.

use std::future::Future;

use nightwatch_domain::error::NightwatchError;
use nightwatch_domain::slider::SliderControl;

/// Writes slider positions back to the host UI.
///
/// Panel writes must not loop back into the engine as slider-change events;
/// adapters are responsible for suppressing the echo.
pub trait ControlPanel {
    /// Move one settings slider to the given value.
    fn set_slider(
        &self,
        control: SliderControl,
        value: f64,
    ) -> impl Future<Output = Result<(), NightwatchError>> + Send;
}

impl<T: ControlPanel + Send + Sync> ControlPanel for std::sync::Arc<T> {
    fn set_slider(
        &self,
        control: SliderControl,
        value: f64,
    ) -> impl Future<Output = Result<(), NightwatchError>> + Send {
        (**self).set_slider(control, value)
    }
}
