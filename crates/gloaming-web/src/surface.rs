//! Where the sky is drawn. The string builders are plain functions; the
//! element handles only exist in the browser build.

use gloaming_core::{MoonIllumination, ThemeState};

pub const SUN_ID: &str = "sky-sun";
pub const MOON_ID: &str = "sky-moon";
pub const ROOT_ID: &str = "sky-root";
pub const MESSAGE_ID: &str = "sky-message";

pub fn left(x_percent: f32) -> String {
    format!("{x_percent:.3}%")
}

pub fn transform(y_vh: f32) -> String {
    format!("translate(-50%, {y_vh:.3}vh)")
}

pub fn opacity(value: f32) -> String {
    format!("{:.3}", value.clamp(0.0, 1.0))
}

pub fn root_class(theme: ThemeState) -> String {
    format!("main-container {}", theme.as_str())
}

/// Custom properties the moon's stylesheet reads to shade its phase.
pub fn moon_properties(ill: MoonIllumination) -> [(&'static str, String); 3] {
    [
        ("--moon-fraction", format!("{:.4}", ill.fraction)),
        ("--moon-phase", format!("{:.4}", ill.phase)),
        ("--moon-angle", format!("{:.4}rad", ill.angle)),
    ]
}

#[cfg(target_arch = "wasm32")]
pub use dom::Surface;

#[cfg(target_arch = "wasm32")]
mod dom {
    use super::*;
    use crate::dom_err;
    use gloaming_core::GloamingError;
    use gloaming_sky::{BodyFrame, RenderFrame, TickReport};
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlElement};

    /// Handles to the page elements the engine writes to.
    pub struct Surface {
        sun: HtmlElement,
        moon: HtmlElement,
        root: Element,
        message: Option<Element>,
        last_frame: Option<RenderFrame>,
    }

    impl Surface {
        pub fn from_document(document: &Document) -> Result<Self, GloamingError> {
            let message = document.get_element_by_id(MESSAGE_ID);
            if message.is_none() {
                log::info!("No #{MESSAGE_ID} element; greeting will not be shown");
            }
            Ok(Self {
                sun: html_element(document, SUN_ID)?,
                moon: html_element(document, MOON_ID)?,
                root: document
                    .get_element_by_id(ROOT_ID)
                    .ok_or_else(|| GloamingError::MissingElement(ROOT_ID.into()))?,
                message,
                last_frame: None,
            })
        }

        /// Write per-tick state: theme class, greeting and moon phase.
        pub fn publish(&self, report: &TickReport) -> Result<(), GloamingError> {
            self.root.set_class_name(&root_class(report.theme));
            if let Some(message) = &self.message {
                message.set_text_content(Some(report.message));
            }
            let style = self.moon.style();
            for (name, value) in moon_properties(report.illumination) {
                style.set_property(name, &value).map_err(dom_err)?;
            }
            Ok(())
        }

        /// Write body placement. Frames identical to the last one are skipped.
        pub fn draw(&mut self, frame: &RenderFrame) -> Result<(), GloamingError> {
            if self.last_frame.as_ref() == Some(frame) {
                return Ok(());
            }
            place(&self.sun, frame.sun)?;
            place(&self.moon, frame.moon)?;
            self.last_frame = Some(*frame);
            Ok(())
        }
    }

    fn place(el: &HtmlElement, body: BodyFrame) -> Result<(), GloamingError> {
        let style = el.style();
        style
            .set_property("left", &left(body.position.x))
            .map_err(dom_err)?;
        style
            .set_property("transform", &transform(body.position.y))
            .map_err(dom_err)?;
        style
            .set_property("opacity", &opacity(body.opacity))
            .map_err(dom_err)?;
        Ok(())
    }

    fn html_element(document: &Document, id: &str) -> Result<HtmlElement, GloamingError> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| GloamingError::MissingElement(id.into()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| GloamingError::Dom(format!("#{id} is not an HTML element")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_styles() {
        assert_eq!(left(50.0), "50.000%");
        assert_eq!(transform(-40.0), "translate(-50%, -40.000vh)");
        assert_eq!(opacity(1.4), "1.000");
        assert_eq!(opacity(0.25), "0.250");
    }

    #[test]
    fn test_root_class_carries_theme() {
        assert_eq!(root_class(ThemeState::Night), "main-container night");
        assert_eq!(root_class(ThemeState::Afternoon), "main-container afternoon");
    }

    #[test]
    fn test_moon_properties() {
        let props = moon_properties(MoonIllumination {
            fraction: 0.5,
            phase: 0.25,
            angle: -1.0,
        });
        assert_eq!(props[0], ("--moon-fraction", "0.5000".to_string()));
        assert_eq!(props[1], ("--moon-phase", "0.2500".to_string()));
        assert_eq!(props[2], ("--moon-angle", "-1.0000rad".to_string()));
    }
}
