//! The panel registry: the ordered list of panels the ticker rotates through.
//!
//! A panel turns a [`ConditionRecord`] into a [`PanelOutput`]:
//!
//! - [`PanelOutput::Skip`]: nothing to show, move on immediately
//! - [`PanelOutput::Fixed`]: one line of text shown for the fixed dwell
//! - [`PanelOutput::Scroll`]: text shown in scrolling mode; the panel also
//!   hands back the [`Resume`] future that decides when rotation continues
//!
//! Order matters. Hazards sit first so they pre-empt everything else whenever
//! one is active.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::config::TickerConfig;
use crate::data::text::{location_cleanup, truncate_chars, DEGREE};
use crate::data::ConditionRecord;
use crate::error::{Result, TickerError};

/// Continuation owned by a scrolling panel.
///
/// The rotation awaits it after rendering the scroll text and advances once it
/// completes. It is lazy: nothing is scheduled until it is first polled.
pub struct Resume(Pin<Box<dyn Future<Output = ()> + Send>>);

impl Resume {
    /// Resume after a fixed delay.
    pub fn after(delay: Duration) -> Self {
        Self::from_future(async move { tokio::time::sleep(delay).await })
    }

    /// Resume when an arbitrary future completes, e.g. an animation's done signal.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self(Box::pin(future))
    }

    /// Wait for the continuation.
    pub async fn wait(self) {
        self.0.await
    }
}

impl fmt::Debug for Resume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resume(..)")
    }
}

/// Content for scrolling mode.
#[derive(Debug)]
pub struct ScrollRequest {
    pub text: String,
    pub resume: Resume,
}

/// What a panel produced for the current record.
#[derive(Debug)]
pub enum PanelOutput {
    /// No content; the rotation moves to the next panel right away.
    Skip,
    /// Fixed text shown for the standard dwell.
    Fixed(String),
    /// Scrolling text; the panel owns when rotation resumes.
    Scroll(ScrollRequest),
}

impl PanelOutput {
    /// The text this output would display, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            PanelOutput::Skip => None,
            PanelOutput::Fixed(text) => Some(text),
            PanelOutput::Scroll(request) => Some(&request.text),
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, PanelOutput::Skip)
    }
}

/// Inputs a panel needs besides the record.
#[derive(Debug, Clone)]
pub struct PanelContext {
    /// How long the hazard panel waits before resuming rotation.
    pub hazard_dwell: Duration,
    /// Station names are cut to this many characters after cleanup.
    pub station_name_width: usize,
}

impl Default for PanelContext {
    fn default() -> Self {
        Self::from(&TickerConfig::default())
    }
}

impl From<&TickerConfig> for PanelContext {
    fn from(config: &TickerConfig) -> Self {
        Self {
            hazard_dwell: config.hazard_dwell,
            station_name_width: config.station_name_width,
        }
    }
}

/// A panel's draw function.
pub type DrawFn = fn(&ConditionRecord, &PanelContext) -> PanelOutput;

/// One entry in the registry.
#[derive(Clone, Copy)]
pub struct Panel {
    pub name: &'static str,
    pub draw: DrawFn,
}

impl Panel {
    pub const fn new(name: &'static str, draw: DrawFn) -> Self {
        Self { name, draw }
    }

    pub fn draw(&self, record: &ConditionRecord, ctx: &PanelContext) -> PanelOutput {
        (self.draw)(record, ctx)
    }
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel").field("name", &self.name).finish()
    }
}

/// Ordered, non-empty list of panels.
#[derive(Debug, Clone)]
pub struct PanelRegistry {
    panels: Vec<Panel>,
}

impl PanelRegistry {
    /// Build a registry from an explicit panel list.
    ///
    /// Fails with [`TickerError::EmptyRegistry`] when `panels` is empty, since
    /// the rotation index must always point at a panel.
    pub fn new(panels: Vec<Panel>) -> Result<Self> {
        if panels.is_empty() {
            return Err(TickerError::EmptyRegistry);
        }
        Ok(Self { panels })
    }

    /// The standard weather rotation.
    pub fn standard() -> Self {
        Self {
            panels: vec![
                Panel::new("hazards", hazards),
                Panel::new("station", station),
                Panel::new("temperature", temperature),
                Panel::new("humidity", humidity),
                Panel::new("pressure", pressure),
                Panel::new("wind", wind),
                Panel::new("visibility", visibility),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether the registry holds no panels.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.panels.iter().map(|p| p.name).collect()
    }
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// First active hazard, scrolled; skipped when there are none.
pub fn hazards(record: &ConditionRecord, ctx: &PanelContext) -> PanelOutput {
    let Some(first) = record.hazards.first() else {
        return PanelOutput::Skip;
    };

    let text = format!(
        "{} {}",
        first.properties.event, first.properties.description
    );
    PanelOutput::Scroll(ScrollRequest {
        text,
        resume: Resume::after(ctx.hazard_dwell),
    })
}

pub fn station(record: &ConditionRecord, ctx: &PanelContext) -> PanelOutput {
    let name = location_cleanup(&record.station.properties.name);
    PanelOutput::Fixed(format!(
        "Conditions at {}",
        truncate_chars(&name, ctx.station_name_width)
    ))
}

/// Temperature, with heat index taking priority over wind chill.
pub fn temperature(record: &ConditionRecord, _ctx: &PanelContext) -> PanelOutput {
    let unit = &record.temperature_unit;
    let mut text = format!("Temp: {}{}{}", record.temperature, DEGREE, unit);
    if record.observations.heat_index.is_reported() {
        text.push_str(&format!("    Heat Index: {}{}{}", record.heat_index, DEGREE, unit));
    } else if record.observations.wind_chill.is_reported() {
        text.push_str(&format!("    Wind Chill: {}{}{}", record.wind_chill, DEGREE, unit));
    }
    PanelOutput::Fixed(text)
}

pub fn humidity(record: &ConditionRecord, _ctx: &PanelContext) -> PanelOutput {
    PanelOutput::Fixed(format!(
        "Humidity: {}%   Dewpoint: {}{}{}",
        record.humidity, record.dew_point, DEGREE, record.temperature_unit
    ))
}

pub fn pressure(record: &ConditionRecord, _ctx: &PanelContext) -> PanelOutput {
    PanelOutput::Fixed(format!(
        "Barometric Pressure: {} {}",
        record.pressure, record.pressure_direction
    ))
}

pub fn wind(record: &ConditionRecord, _ctx: &PanelContext) -> PanelOutput {
    let mut text = if record.wind_speed > 0.0 {
        format!(
            "Wind: {} {} {}",
            record.wind_direction, record.wind_speed, record.wind_unit
        )
    } else {
        "Wind: Calm".to_string()
    };
    if record.wind_gust > 0.0 {
        text.push_str(&format!("  Gusts to {}", record.wind_gust));
    }
    PanelOutput::Fixed(text)
}

pub fn visibility(record: &ConditionRecord, _ctx: &PanelContext) -> PanelOutput {
    let ceiling = if record.ceiling == 0.0 {
        "Unlimited".to_string()
    } else {
        format!("{} {}", record.ceiling, record.ceiling_unit)
    };
    PanelOutput::Fixed(format!(
        "Visib: {} {}  Ceiling: {}",
        record.visibility, record.visibility_unit, ceiling
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{HazardEntry, Measurement};

    fn ctx() -> PanelContext {
        PanelContext::default()
    }

    fn fixed_text(output: PanelOutput) -> String {
        match output {
            PanelOutput::Fixed(text) => text,
            other => panic!("expected fixed output, got {:?}", other),
        }
    }

    #[test]
    fn test_standard_order_puts_hazards_first() {
        let registry = PanelRegistry::standard();
        assert_eq!(
            registry.names(),
            vec!["hazards", "station", "temperature", "humidity", "pressure", "wind", "visibility"]
        );
        assert_eq!(registry.len(), 7);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_output_text_per_variant() {
        assert_eq!(PanelOutput::Skip.text(), None);
        assert_eq!(PanelOutput::Fixed("Wind: Calm".to_string()).text(), Some("Wind: Calm"));

        let record = ConditionRecord::default()
            .with_hazards(vec![HazardEntry::new("Dense Fog Advisory", "Until 9 AM.")]);
        let output = hazards(&record, &ctx());
        assert_eq!(output.text(), Some("Dense Fog Advisory Until 9 AM."));
        assert!(!output.is_skip());
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(matches!(
            PanelRegistry::new(Vec::new()),
            Err(TickerError::EmptyRegistry)
        ));
    }

    #[test]
    fn test_hazards_skip_when_empty() {
        let record = ConditionRecord::default();
        assert!(hazards(&record, &ctx()).is_skip());
    }

    #[test]
    fn test_hazards_scroll_first_entry() {
        let record = ConditionRecord::default().with_hazards(vec![
            HazardEntry::new("Winter Storm Warning", "Heavy snow expected."),
            HazardEntry::new("Wind Advisory", "Gusty winds."),
        ]);
        match hazards(&record, &ctx()) {
            PanelOutput::Scroll(request) => {
                assert_eq!(request.text, "Winter Storm Warning Heavy snow expected.");
            }
            other => panic!("expected scroll output, got {:?}", other),
        }
    }

    #[test]
    fn test_station_cleans_and_truncates() {
        let mut record = ConditionRecord::default();
        record.station.properties.name =
            "Chicago, Chicago O'Hare International Airport".to_string();
        assert_eq!(
            fixed_text(station(&record, &ctx())),
            "Conditions at Chicago O'Hare Inter"
        );
    }

    #[test]
    fn test_temperature_heat_index_wins() {
        let mut record = ConditionRecord {
            temperature: 72.0,
            temperature_unit: "F".to_string(),
            heat_index: 90.0,
            wind_chill: 50.0,
            ..Default::default()
        };
        record.observations.heat_index = Measurement::new(90.0);
        record.observations.wind_chill = Measurement::new(50.0);

        let text = fixed_text(temperature(&record, &ctx()));
        assert!(text.starts_with("Temp: 72°F"));
        assert!(text.contains("Heat Index: 90°F"));
        assert!(!text.contains("Wind Chill"));
    }

    #[test]
    fn test_temperature_wind_chill_without_heat_index() {
        let mut record = ConditionRecord {
            temperature: 20.0,
            temperature_unit: "F".to_string(),
            wind_chill: 9.0,
            ..Default::default()
        };
        record.observations.wind_chill = Measurement::new(-12.7);

        assert_eq!(
            fixed_text(temperature(&record, &ctx())),
            "Temp: 20°F    Wind Chill: 9°F"
        );
    }

    #[test]
    fn test_temperature_plain() {
        let record = ConditionRecord {
            temperature: 55.5,
            temperature_unit: "F".to_string(),
            ..Default::default()
        };
        assert_eq!(fixed_text(temperature(&record, &ctx())), "Temp: 55.5°F");
    }

    #[test]
    fn test_humidity_and_pressure() {
        let record = ConditionRecord {
            humidity: 64.0,
            dew_point: 59.0,
            temperature_unit: "F".to_string(),
            pressure: 30.02,
            pressure_direction: "R".to_string(),
            ..Default::default()
        };
        assert_eq!(
            fixed_text(humidity(&record, &ctx())),
            "Humidity: 64%   Dewpoint: 59°F"
        );
        assert_eq!(
            fixed_text(pressure(&record, &ctx())),
            "Barometric Pressure: 30.02 R"
        );
    }

    #[test]
    fn test_wind_calm() {
        let record = ConditionRecord::default();
        assert_eq!(fixed_text(wind(&record, &ctx())), "Wind: Calm");
    }

    #[test]
    fn test_wind_with_gusts() {
        let record = ConditionRecord {
            wind_speed: 10.0,
            wind_gust: 20.0,
            wind_direction: "NW".to_string(),
            wind_unit: "MPH".to_string(),
            ..Default::default()
        };
        let text = fixed_text(wind(&record, &ctx()));
        assert_eq!(text, "Wind: NW 10 MPH  Gusts to 20");
    }

    #[test]
    fn test_wind_calm_but_gusting() {
        let record = ConditionRecord {
            wind_gust: 15.0,
            ..Default::default()
        };
        assert_eq!(fixed_text(wind(&record, &ctx())), "Wind: Calm  Gusts to 15");
    }

    #[test]
    fn test_visibility_unlimited_ceiling() {
        let record = ConditionRecord {
            visibility: 10.0,
            visibility_unit: "mi.".to_string(),
            ..Default::default()
        };
        let text = fixed_text(visibility(&record, &ctx()));
        assert_eq!(text, "Visib: 10 mi.  Ceiling: Unlimited");
    }

    #[test]
    fn test_visibility_with_ceiling() {
        let record = ConditionRecord {
            visibility: 3.0,
            visibility_unit: "mi.".to_string(),
            ceiling: 500.0,
            ceiling_unit: "ft".to_string(),
            ..Default::default()
        };
        let text = fixed_text(visibility(&record, &ctx()));
        assert!(text.contains("500 ft"));
        assert!(!text.contains("Unlimited"));
    }
}
