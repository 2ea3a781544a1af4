//! Built-in location picker data: country, region and sub-district presets,
//! plus a guess from the host's IANA timezone name.

use miqat_types::GeoCoordinate;
use serde::Serialize;

/// A region with a representative coordinate and its sub-district names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionPreset {
    pub name: &'static str,
    pub coords: GeoCoordinate,
    /// First entry is the default selection.
    pub sub_districts: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountryPreset {
    pub name: &'static str,
    /// First entry is the default selection.
    pub regions: &'static [RegionPreset],
}

impl CountryPreset {
    pub fn default_region(&self) -> &'static RegionPreset {
        &self.regions[0]
    }

    pub fn region(&self, name: &str) -> Option<&'static RegionPreset> {
        self.regions.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }
}

/// A fully resolved picker selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetLocation {
    pub country: &'static str,
    pub region: &'static str,
    pub sub_district: String,
    pub coords: GeoCoordinate,
}

impl PresetLocation {
    /// `"sub-district, region, country"`.
    pub fn label(&self) -> String {
        format!("{}, {}, {}", self.sub_district, self.region, self.country)
    }
}

const fn region(
    name: &'static str,
    lat: f64,
    lng: f64,
    sub_districts: &'static [&'static str],
) -> RegionPreset {
    RegionPreset {
        name,
        coords: GeoCoordinate::new_unchecked(lat, lng),
        sub_districts,
    }
}

pub static COUNTRIES: &[CountryPreset] = &[
    CountryPreset {
        name: "Indonesia",
        regions: &[
            region("Jakarta", -6.2088, 106.8456, &["Central Jakarta", "South Jakarta", "East Jakarta", "West Jakarta"]),
            region("Bali", -8.6705, 115.2126, &["Denpasar", "Ubud", "Kuta", "Seminyak"]),
            region("Surabaya", -7.2575, 112.7521, &["Central Surabaya", "North Surabaya", "East Surabaya", "South Surabaya"]),
            region("Bandung", -6.9175, 107.6191, &["Bandung City", "North Bandung", "South Bandung", "East Bandung"]),
            region("Makassar", -5.1477, 119.4327, &["Makassar City"]),
        ],
    },
    CountryPreset {
        name: "Malaysia",
        regions: &[
            region("Kuala Lumpur", 3.139, 101.6869, &["KLCC", "Bukit Bintang", "Chow Kit", "Bangsar"]),
            region("Penang", 5.4141, 100.3288, &["Georgetown", "Bayan Lepas", "Butterworth", "Balik Pulau"]),
            region("Johor", 1.4927, 103.7414, &["Johor Bahru"]),
            region("Sabah", 5.9804, 116.0735, &["Kota Kinabalu"]),
        ],
    },
    CountryPreset {
        name: "Saudi Arabia",
        regions: &[
            region("Makkah", 21.4225, 39.8262, &["Al Haram", "Aziziyah", "Rusaifah", "Misfalah"]),
            region("Madinah", 24.4672, 39.6111, &["Al Masjid an Nabawi", "Quba", "Al Arid", "Al Awali"]),
            region("Riyadh", 24.7136, 46.6753, &["Riyadh City"]),
            region("Jeddah", 21.4858, 39.1925, &["Jeddah City"]),
        ],
    },
    CountryPreset {
        name: "United Arab Emirates",
        regions: &[
            region("Dubai", 25.2048, 55.2708, &["Downtown", "Jumeirah", "Deira", "Al Barsha"]),
            region("Abu Dhabi", 24.4539, 54.3773, &["Abu Dhabi City"]),
            region("Sharjah", 25.3463, 55.4209, &["Sharjah City"]),
            region("Ajman", 25.4052, 55.5136, &["Ajman City"]),
        ],
    },
    CountryPreset {
        name: "Turkey",
        regions: &[
            region("Istanbul", 41.0082, 28.9784, &["Fatih", "Beyoglu", "Kadikoy", "Uskudar"]),
            region("Ankara", 39.9334, 32.8597, &["Cankaya"]),
            region("Izmir", 38.4237, 27.1428, &["Konak"]),
            region("Bursa", 40.1885, 29.061, &["Osmangazi"]),
        ],
    },
    CountryPreset {
        name: "United States",
        regions: &[
            region("New York", 40.7128, -74.006, &["Manhattan", "Brooklyn", "Queens", "Bronx"]),
            region("California", 34.0522, -118.2437, &["Los Angeles"]),
            region("Texas", 29.7604, -95.3698, &["Houston"]),
            region("Florida", 25.7617, -80.1918, &["Miami"]),
        ],
    },
    CountryPreset {
        name: "United Kingdom",
        regions: &[
            region("London", 51.5074, -0.1278, &["Westminster", "Camden", "Kensington", "Hackney"]),
            region("Manchester", 53.4808, -2.2426, &["Manchester City Centre"]),
            region("Birmingham", 52.4862, -1.8904, &["Birmingham City Centre"]),
            region("Liverpool", 53.4084, -2.9916, &["Liverpool City Centre"]),
        ],
    },
];

/// IANA timezone name -> (country, region) it most likely means.
static TIMEZONE_HINTS: &[(&str, &str, &str)] = &[
    ("Asia/Jakarta", "Indonesia", "Jakarta"),
    ("Asia/Makassar", "Indonesia", "Makassar"),
    ("Asia/Kuala_Lumpur", "Malaysia", "Kuala Lumpur"),
    ("Asia/Riyadh", "Saudi Arabia", "Riyadh"),
    ("Asia/Dubai", "United Arab Emirates", "Dubai"),
    ("Europe/Istanbul", "Turkey", "Istanbul"),
    ("Asia/Istanbul", "Turkey", "Istanbul"),
    ("America/New_York", "United States", "New York"),
    ("Europe/London", "United Kingdom", "London"),
];

pub fn country_names() -> impl Iterator<Item = &'static str> {
    COUNTRIES.iter().map(|c| c.name)
}

pub fn find_country(name: &str) -> Option<&'static CountryPreset> {
    COUNTRIES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Resolves a picker selection, defaulting the region and sub-district to the
/// first entries when absent or unknown.
pub fn resolve(country: &str, region: Option<&str>, sub_district: Option<&str>) -> Option<PresetLocation> {
    let c = find_country(country)?;
    let r = region.and_then(|name| c.region(name)).unwrap_or(c.default_region());
    let sub = sub_district
        .and_then(|s| r.sub_districts.iter().find(|d| d.eq_ignore_ascii_case(s)))
        .or(r.sub_districts.first())
        .copied()
        .unwrap_or(r.name);

    Some(PresetLocation {
        country: c.name,
        region: r.name,
        sub_district: sub.to_string(),
        coords: r.coords,
    })
}

/// Approximate location from an IANA timezone name such as `"Asia/Kuala_Lumpur"`.
///
/// The sub-district is the city part of the zone name, e.g. `"Kuala Lumpur"`.
pub fn location_for_timezone(iana: &str) -> Option<PresetLocation> {
    let &(_, country, region_name) = TIMEZONE_HINTS.iter().find(|(tz, _, _)| *tz == iana)?;
    let mut loc = resolve(country, Some(region_name), None)?;
    if let Some(city) = iana.rsplit('/').next() {
        loc.sub_district = city.replace('_', " ");
    }
    Some(loc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_is_valid() {
        for c in COUNTRIES {
            assert!(!c.regions.is_empty(), "{}", c.name);
            for r in c.regions {
                assert!(GeoCoordinate::new(r.coords.lat, r.coords.lng).is_ok(), "{}", r.name);
                assert!(!r.sub_districts.is_empty(), "{}", r.name);
            }
        }
        assert_eq!(country_names().count(), 7);
    }

    #[test]
    fn test_country_default() {
        let loc = resolve("Malaysia", None, None).unwrap();
        assert_eq!(loc.region, "Kuala Lumpur");
        assert_eq!(loc.sub_district, "KLCC");
        assert_eq!(loc.coords, GeoCoordinate::new_unchecked(3.139, 101.6869));
    }

    #[test]
    fn test_region_and_sub_district() {
        let loc = resolve("Indonesia", Some("bali"), Some("Ubud")).unwrap();
        assert_eq!(loc.region, "Bali");
        assert_eq!(loc.sub_district, "Ubud");
        assert_eq!(loc.label(), "Ubud, Bali, Indonesia");

        let unknown = resolve("Indonesia", Some("Atlantis"), None).unwrap();
        assert_eq!(unknown.region, "Jakarta");
        assert!(resolve("Narnia", None, None).is_none());
    }

    #[test]
    fn test_timezone_hint() {
        let loc = location_for_timezone("Asia/Kuala_Lumpur").unwrap();
        assert_eq!(loc.country, "Malaysia");
        assert_eq!(loc.sub_district, "Kuala Lumpur");

        let makassar = location_for_timezone("Asia/Makassar").unwrap();
        assert_eq!(makassar.coords, GeoCoordinate::new_unchecked(-5.1477, 119.4327));

        assert!(location_for_timezone("Pacific/Auckland").is_none());
    }
}
