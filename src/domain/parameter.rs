// Telemetry parameter registry
//
// The backend identifies series by human-readable Spanish names. Those names
// are a de facto schema, so they live here as metadata on a typed enum
// instead of being matched as loose strings throughout the pipeline.
// An unknown wire name maps to no variant and ultimately to an empty series.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    CurrentSpeed,
    EngineRpm,
    IgnitionState,
    MovementState,
    Odometer,
    FuelLevel,
    InstantConsumption,
    CoolantTemperature,
    EngineLoad,
}

impl Parameter {
    pub const ALL: [Parameter; 9] = [
        Parameter::CurrentSpeed,
        Parameter::EngineRpm,
        Parameter::IgnitionState,
        Parameter::MovementState,
        Parameter::Odometer,
        Parameter::FuelLevel,
        Parameter::InstantConsumption,
        Parameter::CoolantTemperature,
        Parameter::EngineLoad,
    ];

    /// Look up a parameter by the exact wire name the backend uses.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.display_name() == name)
    }

    /// Look up a parameter by its stable route/field key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.key() == key)
    }

    /// The backend's display name for this parameter.
    pub fn display_name(&self) -> &'static str {
        match self {
            Parameter::CurrentSpeed => "Velocidad Actual",
            Parameter::EngineRpm => "Revoluciones (RPM)",
            Parameter::IgnitionState => "Estado de Ignición",
            Parameter::MovementState => "Estado de Movimiento",
            Parameter::Odometer => "Odómetro",
            Parameter::FuelLevel => "Nivel de Combustible",
            Parameter::InstantConsumption => "Consumo Instantáneo",
            Parameter::CoolantTemperature => "Temperatura de Refrigerante",
            Parameter::EngineLoad => "Carga del Motor",
        }
    }

    /// Stable identifier used in routes and joined-record field names.
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::CurrentSpeed => "speed",
            Parameter::EngineRpm => "rpm",
            Parameter::IgnitionState => "ignition",
            Parameter::MovementState => "movement",
            Parameter::Odometer => "odometer",
            Parameter::FuelLevel => "fuel_level",
            Parameter::InstantConsumption => "instant_consumption",
            Parameter::CoolantTemperature => "coolant_temperature",
            Parameter::EngineLoad => "engine_load",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::CurrentSpeed => "km/h",
            Parameter::EngineRpm => "rpm",
            Parameter::IgnitionState => "",
            Parameter::MovementState => "",
            Parameter::Odometer => "km",
            Parameter::FuelLevel => "%",
            Parameter::InstantConsumption => "L/h",
            Parameter::CoolantTemperature => "°C",
            Parameter::EngineLoad => "%",
        }
    }

    /// Multiplier applied to raw values at extraction time.
    ///
    /// The odometer arrives in meters but is displayed in kilometers;
    /// everything else is already in display units. New conversions are a
    /// one-line addition here, nothing in the join/aggregate code changes.
    pub fn scale(&self) -> f64 {
        match self {
            Parameter::Odometer => 1e-3,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire_name() {
        assert_eq!(
            Parameter::from_wire_name("Velocidad Actual"),
            Some(Parameter::CurrentSpeed)
        );
        assert_eq!(
            Parameter::from_wire_name("Estado de Ignición"),
            Some(Parameter::IgnitionState)
        );
        assert_eq!(Parameter::from_wire_name("Sensor Desconocido"), None);
    }

    #[test]
    fn test_from_key_round_trip() {
        for parameter in Parameter::ALL {
            assert_eq!(Parameter::from_key(parameter.key()), Some(parameter));
        }
        assert_eq!(Parameter::from_key("unknown"), None);
    }

    #[test]
    fn test_odometer_scale() {
        assert_eq!(Parameter::Odometer.scale(), 1e-3);
        assert_eq!(Parameter::CurrentSpeed.scale(), 1.0);
    }
}
