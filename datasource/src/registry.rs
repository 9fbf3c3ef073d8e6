//! The fixed set of collections the service exposes.

use std::fmt;
use std::str::FromStr;

use shared::Error;

/// A collection that can be listed from the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    Events,
    Orders,
    Organizers,
    Bookmarks,
    Assortment,
    OwnedEventAttendees,
    OwnedEventOrders,
}

impl Datatype {
    /// Every known datatype, in registry order.
    pub const ALL: [Datatype; 7] = [
        Datatype::Events,
        Datatype::Orders,
        Datatype::Organizers,
        Datatype::Bookmarks,
        Datatype::Assortment,
        Datatype::OwnedEventAttendees,
        Datatype::OwnedEventOrders,
    ];

    /// Name used in the service route and the upstream path.
    pub const fn as_str(self) -> &'static str {
        match self {
            Datatype::Events => "events",
            Datatype::Orders => "orders",
            Datatype::Organizers => "organizers",
            Datatype::Bookmarks => "bookmarks",
            Datatype::Assortment => "assortment",
            Datatype::OwnedEventAttendees => "owned_event_attendees",
            Datatype::OwnedEventOrders => "owned_event_orders",
        }
    }

    /// Look a name up in the registry.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|datatype| datatype.as_str() == name)
    }

    /// Key the upstream response nests the collection under: the last
    /// underscore-separated segment of the name.
    pub fn response_key(self) -> &'static str {
        let name = self.as_str();
        name.rsplit_once('_').map_or(name, |(_, last)| last)
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Datatype {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::lookup(name).ok_or_else(|| Error::NotFound(format!("Unknown datatype {:?}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_round_trips_every_name() {
        for datatype in Datatype::ALL {
            assert_eq!(Datatype::lookup(datatype.as_str()), Some(datatype));
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(Datatype::lookup("attendees"), None);
        assert_eq!(Datatype::lookup("Events"), None);
        assert_eq!(Datatype::lookup(""), None);
        assert!(matches!("users".parse::<Datatype>(), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_response_key() {
        assert_eq!(Datatype::Events.response_key(), "events");
        assert_eq!(Datatype::Assortment.response_key(), "assortment");
        assert_eq!(Datatype::OwnedEventAttendees.response_key(), "attendees");
        assert_eq!(Datatype::OwnedEventOrders.response_key(), "orders");
    }
}
