//! Weather widget data.
//!
//! The widget shows a fixed set of Oregon forecasts on every page. The
//! dataset is static; [`current`] simply hands out a fresh copy.

/// Forecast for a single location shown in the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: &'static str,
    pub forecast_url: &'static str,
    pub icon_url: &'static str,
    pub weather: &'static str,
    pub temp: &'static str,
}

/// Data rendered by the weather widget partial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherWidget {
    pub locations: Vec<Location>,
}

const LOCATIONS: [Location; 3] = [
    Location {
        name: "Portland",
        forecast_url: "http://www.wunderground.com/US/OR/Portland.html",
        icon_url: "http://icons-ak.wxug.com/i/c/k/cloudy.gif",
        weather: "Overcast",
        temp: "54.1 F (12.3 C)",
    },
    Location {
        name: "Bend",
        forecast_url: "http://www.wunderground.com/US/OR/Bend.html",
        icon_url: "http://icons-ak.wxug.com/i/c/k/partlycloudy.gif",
        weather: "Partly Cloudy",
        temp: "55.0 F (12.8 C)",
    },
    Location {
        name: "Manzanita",
        forecast_url: "http://www.wunderground.com/US/OR/Manzanita.html",
        icon_url: "http://icons-ak.wxug.com/i/c/k/rain.gif",
        weather: "Light Rain",
        temp: "55.0 F (12.8 C)",
    },
];

/// Current weather for the widget.
#[must_use]
pub fn current() -> WeatherWidget {
    WeatherWidget {
        locations: LOCATIONS.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_returns_fixed_locations() {
        let widget = current();
        let names: Vec<_> = widget.locations.iter().map(|l| l.name).collect();
        assert_eq!(names, ["Portland", "Bend", "Manzanita"]);
    }

    #[test]
    fn test_locations_have_name_and_weather() {
        for location in current().locations {
            assert!(!location.name.is_empty());
            assert!(!location.weather.is_empty());
        }
    }

    #[test]
    fn test_current_is_stable() {
        assert_eq!(current(), current());
    }
}
