//! Static lookup tables used by the geo resolver.
//!
//! The tables are versioned with the code and never mutated. Each one is
//! indexed into a `HashMap` on first use and shared read-only afterwards.

use std::{collections::HashMap, sync::OnceLock};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Country centroids keyed by ISO 3166-1 alpha-2 code.
pub const COUNTRY_COORDINATES: &[(&str, Coordinate)] = &[
    ("AF", Coordinate::new(33.9391, 67.7100)), // Afghanistan
    ("AL", Coordinate::new(41.1533, 20.1683)), // Albania
    ("DZ", Coordinate::new(28.0339, 1.6596)), // Algeria
    ("AD", Coordinate::new(42.5462, 1.6016)), // Andorra
    ("AO", Coordinate::new(-11.2027, 17.8739)), // Angola
    ("AG", Coordinate::new(17.0608, -61.7964)), // Antigua and Barbuda
    ("AR", Coordinate::new(-38.4161, -63.6167)), // Argentina
    ("AM", Coordinate::new(40.0691, 45.0382)), // Armenia
    ("AU", Coordinate::new(-25.2744, 133.7751)), // Australia
    ("AT", Coordinate::new(47.5162, 14.5501)), // Austria
    ("AZ", Coordinate::new(40.1431, 47.5769)), // Azerbaijan
    ("BS", Coordinate::new(25.0343, -77.3963)), // Bahamas
    ("BH", Coordinate::new(26.0667, 50.5577)), // Bahrain
    ("BD", Coordinate::new(23.6850, 90.3563)), // Bangladesh
    ("BB", Coordinate::new(13.1939, -59.5432)), // Barbados
    ("BY", Coordinate::new(53.9006, 27.5590)), // Belarus
    ("BE", Coordinate::new(50.8503, 4.3517)), // Belgium
    ("BZ", Coordinate::new(17.1899, -88.4976)), // Belize
    ("BJ", Coordinate::new(9.3077, 2.3158)), // Benin
    ("BT", Coordinate::new(27.5142, 90.4336)), // Bhutan
    ("BO", Coordinate::new(-16.2902, -63.5887)), // Bolivia
    ("BA", Coordinate::new(43.9159, 17.6791)), // Bosnia and Herzegovina
    ("BW", Coordinate::new(-22.3285, 24.6849)), // Botswana
    ("BR", Coordinate::new(-14.2350, -51.9253)), // Brazil
    ("BN", Coordinate::new(4.5353, 114.7277)), // Brunei
    ("BG", Coordinate::new(42.7339, 25.4858)), // Bulgaria
    ("BF", Coordinate::new(12.2383, -1.5616)), // Burkina Faso
    ("BI", Coordinate::new(-3.3731, 29.9189)), // Burundi
    ("KH", Coordinate::new(12.5657, 104.9910)), // Cambodia
    ("CM", Coordinate::new(7.3697, 12.3547)), // Cameroon
    ("CA", Coordinate::new(56.1304, -106.3468)), // Canada
    ("CV", Coordinate::new(16.5388, -23.0418)), // Cape Verde
    ("CF", Coordinate::new(6.6111, 20.9394)), // Central African Republic
    ("TD", Coordinate::new(15.4542, 18.7322)), // Chad
    ("CL", Coordinate::new(-35.6751, -71.5430)), // Chile
    ("CN", Coordinate::new(35.8617, 104.1954)), // China
    ("CO", Coordinate::new(4.5709, -74.2973)), // Colombia
    ("KM", Coordinate::new(-11.6455, 43.3333)), // Comoros
    ("CG", Coordinate::new(-0.2280, 15.8277)), // Congo (Brazzaville)
    ("CD", Coordinate::new(-4.0383, 21.7587)), // Congo (Kinshasa)
    ("CR", Coordinate::new(9.7489, -83.7534)), // Costa Rica
    ("CI", Coordinate::new(7.5399, -5.5471)), // Côte d'Ivoire
    ("HR", Coordinate::new(45.1000, 15.2000)), // Croatia
    ("CU", Coordinate::new(21.5218, -77.7812)), // Cuba
    ("CY", Coordinate::new(35.1264, 33.4299)), // Cyprus
    ("CZ", Coordinate::new(49.8175, 15.4729)), // Czech Republic
    ("DK", Coordinate::new(56.2639, 9.5018)), // Denmark
    ("DJ", Coordinate::new(11.8251, 42.5903)), // Djibouti
    ("DO", Coordinate::new(18.7357, -70.1627)), // Dominican Republic
    ("EC", Coordinate::new(-1.8312, -78.1834)), // Ecuador
    ("EG", Coordinate::new(26.8206, 30.8025)), // Egypt
    ("SV", Coordinate::new(13.7942, -88.8965)), // El Salvador
    ("GQ", Coordinate::new(1.6508, 10.2679)), // Equatorial Guinea
    ("ER", Coordinate::new(15.1794, 39.7823)), // Eritrea
    ("EE", Coordinate::new(58.5953, 25.0136)), // Estonia
    ("ET", Coordinate::new(9.1450, 40.4897)), // Ethiopia
    ("FI", Coordinate::new(61.9241, 25.7482)), // Finland
    ("FR", Coordinate::new(46.6034, 1.8883)), // France
    ("DE", Coordinate::new(51.1657, 10.4515)), // Germany
    ("GH", Coordinate::new(7.9465, -1.0232)), // Ghana
    ("GR", Coordinate::new(39.0742, 21.8243)), // Greece
    ("GT", Coordinate::new(15.7835, -90.2308)), // Guatemala
    ("HT", Coordinate::new(18.9712, -72.2852)), // Haiti
    ("HU", Coordinate::new(47.1625, 19.5033)), // Hungary
    ("IN", Coordinate::new(20.5937, 78.9629)), // India
    ("ID", Coordinate::new(-0.7893, 113.9213)), // Indonesia
    ("IR", Coordinate::new(32.4279, 53.6880)), // Iran
    ("IQ", Coordinate::new(33.2232, 43.6793)), // Iraq
    ("IE", Coordinate::new(53.4129, -8.2439)), // Ireland
    ("IL", Coordinate::new(31.0461, 34.8516)), // Israel
    ("IT", Coordinate::new(41.8719, 12.5674)), // Italy
    ("JP", Coordinate::new(36.2048, 138.2529)), // Japan
    ("KE", Coordinate::new(-1.286389, 36.817223)), // Kenya
    ("KR", Coordinate::new(35.9078, 127.7669)), // South Korea
    ("MY", Coordinate::new(4.2105, 101.9758)), // Malaysia
    ("MX", Coordinate::new(23.6345, -102.5528)), // Mexico
    ("NL", Coordinate::new(52.1326, 5.2913)), // Netherlands
    ("NZ", Coordinate::new(-40.9006, 174.8860)), // New Zealand
    ("NG", Coordinate::new(9.0820, 8.6753)), // Nigeria
    ("NO", Coordinate::new(60.4720, 8.4689)), // Norway
    ("PK", Coordinate::new(30.3753, 69.3451)), // Pakistan
    ("PH", Coordinate::new(12.8797, 121.7740)), // Philippines
    ("PL", Coordinate::new(51.9194, 19.1451)), // Poland
    ("PT", Coordinate::new(39.3999, -8.2245)), // Portugal
    ("RU", Coordinate::new(61.5240, 105.3188)), // Russia
    ("ZA", Coordinate::new(-30.5595, 22.9375)), // South Africa
    ("ES", Coordinate::new(40.4637, -3.7492)), // Spain
    ("SE", Coordinate::new(60.1282, 18.6435)), // Sweden
    ("CH", Coordinate::new(46.8182, 8.2275)), // Switzerland
    ("TH", Coordinate::new(15.8700, 100.9925)), // Thailand
    ("TR", Coordinate::new(38.9637, 35.2433)), // Turkey
    ("UA", Coordinate::new(48.3794, 31.1656)), // Ukraine
    ("GB", Coordinate::new(55.3781, -3.4360)), // United Kingdom
    ("US", Coordinate::new(37.0902, -95.7129)), // United States
    ("VN", Coordinate::new(14.0583, 108.2772)), // Vietnam
];

/// Country names keyed by the two-letter prefix of a functional location.
pub const LOCATION_COUNTRIES: &[(&str, &str)] = &[
    ("AF", "Afghanistan"),
    ("AL", "Albania"),
    ("DZ", "Algeria"),
    ("AD", "Andorra"),
    ("AO", "Angola"),
    ("AG", "Antigua and Barbuda"),
    ("AR", "Argentina"),
    ("AM", "Armenia"),
    ("AU", "Australia"),
    ("AT", "Austria"),
    ("AZ", "Azerbaijan"),
    ("BS", "Bahamas"),
    ("BH", "Bahrain"),
    ("BD", "Bangladesh"),
    ("BB", "Barbados"),
    ("BY", "Belarus"),
    ("BE", "Belgium"),
    ("BZ", "Belize"),
    ("BJ", "Benin"),
    ("BT", "Bhutan"),
    ("BO", "Bolivia"),
    ("BA", "Bosnia and Herzegovina"),
    ("BW", "Botswana"),
    ("BR", "Brazil"),
    ("BN", "Brunei"),
    ("BG", "Bulgaria"),
    ("BF", "Burkina Faso"),
    ("BI", "Burundi"),
    ("KH", "Cambodia"),
    ("CM", "Cameroon"),
    ("CA", "Canada"),
    ("CV", "Cape Verde"),
    ("CF", "Central African Republic"),
    ("TD", "Chad"),
    ("CL", "Chile"),
    ("CN", "China"),
    ("CO", "Colombia"),
    ("KM", "Comoros"),
    ("CD", "Congo (Democratic Republic)"),
    ("CG", "Congo (Republic)"),
    ("CR", "Costa Rica"),
    ("HR", "Croatia"),
    ("CU", "Cuba"),
    ("CY", "Cyprus"),
    ("CZ", "Czechia"),
    ("DK", "Denmark"),
    ("DJ", "Djibouti"),
    ("DM", "Dominica"),
    ("DO", "Dominican Republic"),
    ("EC", "Ecuador"),
    ("EG", "Egypt"),
    ("SV", "El Salvador"),
    ("GQ", "Equatorial Guinea"),
    ("ER", "Eritrea"),
    ("EE", "Estonia"),
    ("ET", "Ethiopia"),
    ("FJ", "Fiji"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GA", "Gabon"),
    ("GM", "Gambia"),
    ("GE", "Georgia"),
    ("DE", "Germany"),
    ("GH", "Ghana"),
    ("GR", "Greece"),
    ("GD", "Grenada"),
    ("GT", "Guatemala"),
    ("GN", "Guinea"),
    ("GW", "Guinea-Bissau"),
    ("GY", "Guyana"),
    ("HT", "Haiti"),
    ("HN", "Honduras"),
    ("HU", "Hungary"),
    ("IS", "Iceland"),
    ("IN", "India"),
    ("ID", "Indonesia"),
    ("IR", "Iran"),
    ("IQ", "Iraq"),
    ("IE", "Ireland"),
    ("IL", "Israel"),
    ("IT", "Italy"),
    ("JM", "Jamaica"),
    ("JP", "Japan"),
    ("JO", "Jordan"),
    ("KZ", "Kazakhstan"),
    ("KE", "Kenya"),
    ("KI", "Kiribati"),
    ("KW", "Kuwait"),
    ("KG", "Kyrgyzstan"),
    ("LA", "Laos"),
    ("LV", "Latvia"),
    ("LB", "Lebanon"),
    ("LS", "Lesotho"),
    ("LR", "Liberia"),
    ("LY", "Libya"),
    ("LI", "Liechtenstein"),
    ("LT", "Lithuania"),
    ("LU", "Luxembourg"),
    ("MG", "Madagascar"),
    ("MW", "Malawi"),
    ("MY", "Malaysia"),
    ("MV", "Maldives"),
    ("ML", "Mali"),
    ("MT", "Malta"),
    ("MH", "Marshall Islands"),
    ("MR", "Mauritania"),
    ("MU", "Mauritius"),
    ("MX", "Mexico"),
    ("FM", "Micronesia"),
    ("MD", "Moldova"),
    ("MC", "Monaco"),
    ("MN", "Mongolia"),
    ("ME", "Montenegro"),
    ("MA", "Morocco"),
    ("MZ", "Mozambique"),
    ("MM", "Myanmar"),
    ("NA", "Namibia"),
    ("NR", "Nauru"),
    ("NP", "Nepal"),
    ("NL", "Netherlands"),
    ("NZ", "New Zealand"),
    ("NI", "Nicaragua"),
    ("NE", "Niger"),
    ("NG", "Nigeria"),
    ("KP", "North Korea"),
    ("MK", "North Macedonia"),
    ("NO", "Norway"),
    ("OM", "Oman"),
    ("PK", "Pakistan"),
    ("PW", "Palau"),
    ("PA", "Panama"),
    ("PG", "Papua New Guinea"),
    ("PY", "Paraguay"),
    ("PE", "Peru"),
    ("PH", "Philippines"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("QA", "Qatar"),
    ("RO", "Romania"),
    ("RU", "Russia"),
    ("RW", "Rwanda"),
    ("WS", "Samoa"),
    ("SM", "San Marino"),
    ("ST", "Sao Tome and Principe"),
    ("SA", "Saudi Arabia"),
    ("SN", "Senegal"),
    ("RS", "Serbia"),
    ("SC", "Seychelles"),
    ("SL", "Sierra Leone"),
    ("SG", "Singapore"),
    ("SK", "Slovakia"),
    ("SI", "Slovenia"),
    ("SB", "Solomon Islands"),
    ("SO", "Somalia"),
    ("ZA", "South Africa"),
    ("KR", "South Korea"),
    ("SS", "South Sudan"),
    ("ES", "Spain"),
    ("LK", "Sri Lanka"),
    ("SD", "Sudan"),
    ("SR", "Suriname"),
    ("SE", "Sweden"),
    ("CH", "Switzerland"),
    ("SY", "Syria"),
    ("TW", "Taiwan"),
    ("TJ", "Tajikistan"),
    ("TZ", "Tanzania"),
    ("TH", "Thailand"),
    ("TG", "Togo"),
    ("TO", "Tonga"),
    ("TT", "Trinidad and Tobago"),
    ("TN", "Tunisia"),
    ("TR", "Turkey"),
    ("TM", "Turkmenistan"),
    ("TV", "Tuvalu"),
    ("UG", "Uganda"),
    ("UA", "Ukraine"),
    ("AE", "United Arab Emirates"),
    ("GB", "United Kingdom"),
    ("US", "United States"),
    ("UY", "Uruguay"),
    ("UZ", "Uzbekistan"),
    ("VU", "Vanuatu"),
    ("VA", "Vatican City"),
    ("VE", "Venezuela"),
    ("VN", "Vietnam"),
    ("YE", "Yemen"),
    ("ZM", "Zambia"),
    ("ZW", "Zimbabwe"),
];

/// Coarse regional centroids used when no country can be determined.
pub const REGION_COORDINATES: &[(&str, Coordinate)] = &[
    ("North America", Coordinate::new(45.0000, -100.0000)),
    ("Central America", Coordinate::new(10.0000, -85.0000)),
    ("Caribbean", Coordinate::new(20.0000, -75.0000)),
    ("South America", Coordinate::new(-15.0000, -60.0000)),
    ("Latin America", Coordinate::new(-10.0000, -55.0000)),
    ("Western Europe", Coordinate::new(50.0000, 5.0000)),
    ("Eastern Europe", Coordinate::new(55.0000, 25.0000)),
    ("Northern Europe", Coordinate::new(60.0000, 15.0000)),
    ("Southern Europe", Coordinate::new(40.0000, 15.0000)),
    ("Europe", Coordinate::new(50.0000, 10.0000)),
    ("North Africa", Coordinate::new(25.0000, 10.0000)),
    ("Sub-Saharan Africa", Coordinate::new(-5.0000, 20.0000)),
    ("West Africa", Coordinate::new(10.0000, -5.0000)),
    ("East Africa", Coordinate::new(-2.0000, 35.0000)),
    ("Central Africa", Coordinate::new(0.0000, 20.0000)),
    ("Southern Africa", Coordinate::new(-20.0000, 25.0000)),
    ("Middle East", Coordinate::new(25.0000, 50.0000)),
    ("West Asia", Coordinate::new(30.0000, 45.0000)),
    ("Central Asia", Coordinate::new(40.0000, 70.0000)),
    ("South Asia", Coordinate::new(20.0000, 80.0000)),
    ("Southeast Asia", Coordinate::new(10.0000, 110.0000)),
    ("East Asia", Coordinate::new(35.0000, 120.0000)),
    ("Asia", Coordinate::new(30.0000, 100.0000)),
    ("Oceania", Coordinate::new(-10.0000, 160.0000)),
    ("Australia", Coordinate::new(-25.0000, 135.0000)),
    ("Pacific Islands", Coordinate::new(-5.0000, 170.0000)),
    ("Arctic", Coordinate::new(75.0000, 0.0000)),
    ("Antarctica", Coordinate::new(-75.0000, 0.0000)),
];

fn index<V: Copy>(table: &'static [(&'static str, V)]) -> HashMap<&'static str, V> {
    table.iter().copied().collect()
}

fn countries() -> &'static HashMap<&'static str, Coordinate> {
    static INDEX: OnceLock<HashMap<&'static str, Coordinate>> = OnceLock::new();
    INDEX.get_or_init(|| index(COUNTRY_COORDINATES))
}

fn locations() -> &'static HashMap<&'static str, &'static str> {
    static INDEX: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    INDEX.get_or_init(|| index(LOCATION_COUNTRIES))
}

fn location_codes() -> &'static HashMap<&'static str, &'static str> {
    static INDEX: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    INDEX.get_or_init(|| {
        LOCATION_COUNTRIES
            .iter()
            .map(|(code, name)| (*name, *code))
            .collect()
    })
}

fn regions() -> &'static HashMap<&'static str, Coordinate> {
    static INDEX: OnceLock<HashMap<&'static str, Coordinate>> = OnceLock::new();
    INDEX.get_or_init(|| index(REGION_COORDINATES))
}

pub fn country_coordinate(code: &str) -> Option<Coordinate> {
    countries().get(code).copied()
}

pub fn location_country(prefix: &str) -> Option<&'static str> {
    locations().get(prefix).copied()
}

/// Reverse of [`location_country`].
pub fn country_code_for_name(name: &str) -> Option<&'static str> {
    location_codes().get(name).copied()
}

pub fn region_coordinate(region: &str) -> Option<Coordinate> {
    regions().get(region).copied()
}
