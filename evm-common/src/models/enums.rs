//! Text-valued enumerations stored in the database
//!
//! Each enum serializes (JSON) and persists (SQL) as the same text value, and
//! parses back with [`FromStr`](std::str::FromStr).

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Text stored in the database
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::Error::InvalidInput(format!(
                        "Invalid {} '{}' (expected one of: {})",
                        $label,
                        other,
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }
    };
}

pub(crate) use text_enum;

text_enum! {
    /// Lifecycle status of an event
    #[derive(Default)]
    EventStatus ("event status") {
        #[default]
        Planned => "Planned",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

text_enum! {
    VenueType ("venue type") {
        Indoor => "Indoor",
        Outdoor => "Outdoor",
        Stadium => "Stadium",
        Hall => "Hall",
        Theater => "Theater",
    }
}

text_enum! {
    StaffRole ("staff role") {
        Security => "Security",
        Technician => "Technician",
        Manager => "Manager",
        Volunteer => "Volunteer",
        Cleaner => "Cleaner",
        Coordinator => "Coordinator",
    }
}

text_enum! {
    /// Shift worked by a staff member at an event
    Shift ("shift") {
        FullDay => "FULL_DAY",
        Morning => "MORNING",
        Evening => "EVENING",
        Night => "NIGHT",
    }
}

text_enum! {
    Gender ("gender") {
        Male => "M",
        Female => "F",
        Other => "O",
    }
}

text_enum! {
    /// Sale state of a ticket; changed by purchase triggers
    TicketStatus ("ticket status") {
        Available => "AVAILABLE",
        Sold => "SOLD",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod with_result_alias {
        use crate::Result;

        crate::models::enums::text_enum! {
            #[derive(Default)]
            Switch ("switch") {
                On => "ON",
                #[default]
                Off => "OFF",
            }
        }

        pub fn parse(s: &str) -> Result<Switch> {
            s.parse()
        }
    }

    #[test]
    fn test_enum_declared_next_to_result_alias() {
        use with_result_alias::{parse, Switch};

        assert_eq!(parse("ON").unwrap(), Switch::On);
        assert!(parse("on").is_err());
        assert_eq!(Switch::default(), Switch::Off);
    }

    #[test]
    fn test_shift_uses_database_text() {
        assert_eq!(Shift::FullDay.as_str(), "FULL_DAY");
        assert_eq!("EVENING".parse::<Shift>().unwrap(), Shift::Evening);
        assert_eq!(
            serde_json::to_string(&Shift::Night).unwrap(),
            "\"NIGHT\""
        );
    }

    #[test]
    fn test_invalid_value_lists_choices() {
        let err = "Arena".parse::<VenueType>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("venue type"));
        assert!(message.contains("Indoor, Outdoor, Stadium, Hall, Theater"));
    }

    #[test]
    fn test_event_status_defaults_to_planned() {
        assert_eq!(EventStatus::default(), EventStatus::Planned);
    }

    #[test]
    fn test_gender_deserializes_from_letter() {
        let gender: Gender = serde_json::from_str("\"F\"").unwrap();
        assert_eq!(gender, Gender::Female);
    }
}
