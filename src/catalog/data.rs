//! Built-in listings served by the mock catalog

use crate::types::SearchResultItem;

/// (listing id, title, price in euro cents)
const LISTINGS: &[(&str, &str, u32)] = &[
    ("266812340011", "Vintage Philips radio, walnut cabinet, working", 4500),
    ("266812340012", "IKEA Poäng armchair, birch veneer, beige cushion", 3500),
    ("266812340013", "Gazelle Chamonix ladies bike, 57 cm frame", 17500),
    ("266812340014", "Canon AE-1 Program with 50mm f/1.8 lens", 18950),
    ("266812340015", "Le Creuset cast iron casserole 24 cm, volcanic", 9900),
    ("266812340016", "Pastoe sideboard, 1960s, teak", 42500),
    ("266812340017", "Nintendo Game Boy Color, teal, with Pokémon Gold", 8900),
    ("266812340018", "Levi's 501 jeans W32 L32, stonewash", 2450),
    ("266812340019", "Gispen 201 chair, chrome and black leather", 27500),
    ("266812340020", "Bosch PSB 500 RE hammer drill with case", 3995),
    ("266812340021", "Royal Delft blue vase, hand painted, 22 cm", 6500),
    ("266812340022", "Sony WH-1000XM4 headphones, black, boxed", 14900),
    ("266812340023", "Anglepoise desk lamp, Type 75, grey", 8000),
    ("266812340024", "LEGO Technic 42083 Bugatti Chiron, complete", 24900),
    ("266812340025", "Dr. Martens 1460 boots, cherry red, size 42", 6995),
    ("266812340026", "Moccamaster KBG 741, polished silver", 9500),
    ("266812340027", "Eames-style lounge chair replica with ottoman", 39900),
    ("266812340028", "Fender Squier Stratocaster, sunburst", 15900),
    ("266812340029", "Apple iPad Air 4th gen 64GB, space grey", 32500),
    ("266812340030", "Rosenthal Studio Line coffee set, 6 persons", 5500),
    ("266812340031", "Brabantia pedal bin 30L, matt steel", 1800),
    ("266812340032", "Barbour Beaufort wax jacket, olive, size L", 11000),
    ("266812340033", "Nikon D7200 body, 21k shutter count", 42900),
    ("266812340034", "Tolix-style metal bar stools, set of 2", 7500),
    ("266812340035", "Vitra Panton chair, white", 16500),
    ("266812340036", "KitchenAid Artisan stand mixer, empire red", 27900),
    ("266812340037", "Polaroid SX-70 Land Camera, folding", 21000),
    ("266812340038", "Rattan peacock chair, boho, restored", 12500),
    ("266812340039", "Makita DHP482 cordless drill, 2 batteries", 11900),
    ("266812340040", "Teak nesting tables, set of 3, Danish design", 14500),
    ("266812340041", "Bose SoundLink Mini II, carbon", 6900),
    ("266812340042", "Ray-Ban Wayfarer RB2140, black, with case", 6500),
];

/// Format cents as a Dutch-style euro price, e.g. `€ 45,00`
pub fn format_price(cents: u32) -> String {
    format!("€ {},{:02}", cents / 100, cents % 100)
}

/// The full mock catalog in its canonical (unshuffled) order
pub fn default_catalog() -> Vec<SearchResultItem> {
    LISTINGS
        .iter()
        .map(|(id, title, cents)| SearchResultItem {
            id: (*id).to_string(),
            title: (*title).to_string(),
            price: format_price(*cents),
            image: format!("https://i.ebayimg.com/images/g/{}/s-l500.jpg", id),
            url: format!("https://www.ebay.nl/itm/{}", id),
        })
        .collect()
}
