use super::models::CoffeeProfile;

const SAMPLE_PROFILES: [[(&str, &str); 13]; 8] = [
    [
        ("id", "coffee-1"),
        ("name", "Ethiopia Yirgacheffe"),
        ("source", "Ethiopia"),
        ("roast", "Light"),
        ("process", "Washed"),
        ("variety", "Heirloom"),
        ("altitude", "1800-2200m"),
        ("notes", "Floral, Citrus, Bergamot"),
        ("description", "Bright and complex coffee with floral notes and citrus acidity"),
        ("temperature", "92°C"),
        ("grind_size", "Medium-Fine"),
        ("brew_ratio", "1:16"),
        ("brew_time", "3:30"),
    ],
    [
        ("id", "coffee-2"),
        ("name", "Colombia Huila"),
        ("source", "Colombia"),
        ("roast", "Medium"),
        ("process", "Washed"),
        ("variety", "Caturra, Castillo"),
        ("altitude", "1600-1900m"),
        ("notes", "Chocolate, Caramel, Red Apple"),
        ("description", "Sweet and balanced with chocolate notes and medium body"),
        ("temperature", "94°C"),
        ("grind_size", "Medium"),
        ("brew_ratio", "1:15"),
        ("brew_time", "3:45"),
    ],
    [
        ("id", "coffee-3"),
        ("name", "Guatemala Antigua"),
        ("source", "Guatemala"),
        ("roast", "Medium"),
        ("process", "Washed"),
        ("variety", "Bourbon"),
        ("altitude", "1500-1700m"),
        ("notes", "Chocolate, Spice, Orange"),
        ("description", "Rich body with chocolate and subtle orange notes"),
        ("temperature", "93°C"),
        ("grind_size", "Medium"),
        ("brew_ratio", "1:15.5"),
        ("brew_time", "3:30"),
    ],
    [
        ("id", "coffee-4"),
        ("name", "Kenya AA"),
        ("source", "Kenya"),
        ("roast", "Medium-Light"),
        ("process", "Washed"),
        ("variety", "SL28, SL34"),
        ("altitude", "1700-1900m"),
        ("notes", "Blackcurrant, Grapefruit, Brown Sugar"),
        ("description", "Vibrant acidity with fruity notes and a sweet finish"),
        ("temperature", "94°C"),
        ("grind_size", "Medium-Fine"),
        ("brew_ratio", "1:16"),
        ("brew_time", "3:15"),
    ],
    [
        ("id", "coffee-5"),
        ("name", "Costa Rica Tarrazu"),
        ("source", "Costa Rica"),
        ("roast", "Medium"),
        ("process", "Honey"),
        ("variety", "Caturra"),
        ("altitude", "1500-1800m"),
        ("notes", "Honey, Stone Fruit, Hazelnut"),
        ("description", "Sweet and smooth with a honey-like sweetness and nutty finish"),
        ("temperature", "93°C"),
        ("grind_size", "Medium"),
        ("brew_ratio", "1:16"),
        ("brew_time", "3:30"),
    ],
    [
        ("id", "coffee-6"),
        ("name", "Brazil Cerrado"),
        ("source", "Brazil"),
        ("roast", "Medium-Dark"),
        ("process", "Natural"),
        ("variety", "Mundo Novo, Catuai"),
        ("altitude", "1000-1200m"),
        ("notes", "Chocolate, Nut, Caramel"),
        ("description", "Low acidity with chocolate notes and nutty undertones"),
        ("temperature", "92°C"),
        ("grind_size", "Medium-Coarse"),
        ("brew_ratio", "1:15"),
        ("brew_time", "4:00"),
    ],
    [
        ("id", "coffee-7"),
        ("name", "Indonesia Sumatra Mandheling"),
        ("source", "Indonesia"),
        ("roast", "Dark"),
        ("process", "Wet-Hulled"),
        ("variety", "Typica, Catimor"),
        ("altitude", "900-1500m"),
        ("notes", "Earthy, Cedar, Dark Chocolate"),
        ("description", "Full-bodied with earthy notes and low acidity"),
        ("temperature", "91°C"),
        ("grind_size", "Medium-Coarse"),
        ("brew_ratio", "1:14"),
        ("brew_time", "4:15"),
    ],
    [
        ("id", "coffee-8"),
        ("name", "Panama Gesha"),
        ("source", "Panama"),
        ("roast", "Light"),
        ("process", "Washed"),
        ("variety", "Gesha"),
        ("altitude", "1600-1800m"),
        ("notes", "Jasmine, Bergamot, Peach"),
        ("description", "Delicate and tea-like with floral aromas and juicy acidity"),
        ("temperature", "94°C"),
        ("grind_size", "Medium-Fine"),
        ("brew_ratio", "1:17"),
        ("brew_time", "3:15"),
    ],
];

/// Built-in profiles shown when neither the sheet nor the cache is usable.
pub fn sample_profiles() -> Vec<CoffeeProfile> {
    SAMPLE_PROFILES.iter().map(|fields| CoffeeProfile::from_pairs(fields.iter().copied())).collect()
}
