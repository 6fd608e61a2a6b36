/// Curated places bundled with the app
///
/// The catalog is built once at startup and never mutated. Searches slice it
/// synchronously so the client has something to show before the AI guide
/// answers.
use crate::models::{Category, Place, PriceTier, Region, SearchQuery};

#[derive(Debug, Clone)]
pub struct Catalog {
    places: Vec<Place>,
}

impl Catalog {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// The hand-picked featured places
    pub fn featured() -> Self {
        Self::new(vec![
            curated(
                "brihadisvara-temple",
                "Brihadisvara Temple",
                "தஞ்சை பெரிய கோவில்",
                Category::Travel,
                Region::Thanjavur,
                "Thanjavur City",
                "Membalam Rd, Balaji Nagar",
                "A 1000-year-old architectural marvel built by Raja Raja Chola I, featuring the tallest vimanam in the world.",
                PriceTier::Free,
                "Free Entry",
                "Early morning or Sunset",
                4.9,
            ),
            curated(
                "meenakshi-temple",
                "Meenakshi Amman Temple",
                "மதுரை மீனாட்சி அம்மன் கோவில்",
                Category::Travel,
                Region::Madurai,
                "Madurai Center",
                "Madurai Main",
                "The historic center of Madurai, known for its stunning gopurams and the Hall of Thousand Pillars.",
                PriceTier::Free,
                "Free Entry",
                "December to February",
                5.0,
            ),
            curated(
                "vivekananda-rock",
                "Vivekananda Rock Memorial",
                "விவேகானந்தர் பாறை",
                Category::Travel,
                Region::Kanyakumari,
                "Ocean Front",
                "Kanyakumari Coast",
                "A sacred monument built on a rock island where Swami Vivekananda meditated, at the confluence of three seas.",
                PriceTier::Budget,
                "₹50 ferry ride",
                "Sunrise",
                4.8,
            ),
            curated(
                "ooty-toy-train",
                "Nilgiri Mountain Railway",
                "நீலகிரி மலை இரயில்",
                Category::Travel,
                Region::Nilgiris,
                "Western Ghats",
                "Mettupalayam to Ooty",
                "A UNESCO heritage toy train ride offering breathtaking views of tea gardens and misty hills.",
                PriceTier::Budget,
                "₹200 - ₹500",
                "Summer (March - June)",
                4.9,
            ),
            curated(
                "dhanushkodi-ghost-town",
                "Dhanushkodi Ghost Town",
                "தனுஷ்கோடி",
                Category::Adventure,
                Region::Ramanathapuram,
                "Rameswaram",
                "Rameswaram Tip",
                "A hauntingly beautiful town destroyed by a cyclone, where the Indian Ocean and Bay of Bengal meet.",
                PriceTier::Free,
                "Free access",
                "Early morning",
                4.7,
            ),
            curated(
                "madurai-jigarthanda",
                "Famous Jigarthanda",
                "மதுரை ஜிகர்தண்டா",
                Category::Food,
                Region::Madurai,
                "Madurai",
                "Anna Nagar / Town Hall Road",
                "The legendary cooling drink of Madurai made with almond gum, sarsaparilla syrup, and thick milk.",
                PriceTier::Budget,
                "₹40 - ₹80",
                "Anytime",
                4.8,
            ),
            curated(
                "marina-beach",
                "Marina Beach",
                "மெரினா கடற்கரை",
                Category::Travel,
                Region::Chennai,
                "Triplicane",
                "Kamarajar Salai",
                "One of the longest urban beaches in the world, alive with kite flyers, sundal vendors and evening walkers.",
                PriceTier::Free,
                "Free",
                "Evenings, November to February",
                4.5,
            ),
            curated(
                "pondy-bazaar",
                "Pondy Bazaar",
                "பாண்டி பஜார்",
                Category::Shopping,
                Region::Chennai,
                "T. Nagar",
                "Sir Thyagaraya Road",
                "A pedestrian shopping street packed with silk, jewellery, footwear and street snacks.",
                PriceTier::MidRange,
                "Varies",
                "Weekday evenings",
                4.3,
            ),
        ])
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Places matching the category and region filters, in catalog order
    pub fn filter(&self, category: Option<Category>, region: Region) -> Vec<Place> {
        let query = SearchQuery {
            category,
            region,
            ..SearchQuery::default()
        };
        self.matching(&query)
    }

    pub fn matching(&self, query: &SearchQuery) -> Vec<Place> {
        self.places
            .iter()
            .filter(|place| query.matches(place))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|place| place.id == id)
    }
}

#[allow(clippy::too_many_arguments)]
fn curated(
    id: &str,
    name: &str,
    local_name: &str,
    category: Category,
    region: Region,
    sub_area: &str,
    location: &str,
    description: &str,
    price_tier: PriceTier,
    cost: &str,
    best_time: &str,
    rating: f64,
) -> Place {
    Place {
        id: id.to_string(),
        name: name.to_string(),
        local_name: Some(local_name.to_string()),
        category,
        region,
        sub_area: sub_area.to_string(),
        location: Some(location.to_string()),
        description: description.to_string(),
        price_tier,
        cost: Some(cost.to_string()),
        best_time: Some(best_time.to_string()),
        rating: Some(rating),
        image_ref: None,
        source_links: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_unfiltered_returns_everything_in_order() {
        let catalog = Catalog::featured();
        let all = catalog.filter(None, Region::All);
        assert_eq!(all.len(), catalog.len());
        assert_eq!(all.first().map(|p| p.id.as_str()), Some("brihadisvara-temple"));
    }

    #[test]
    fn test_filter_by_category_and_region() {
        let catalog = Catalog::featured();
        let food_in_madurai = catalog.filter(Some(Category::Food), Region::Madurai);
        assert_eq!(ids(&food_in_madurai), vec!["madurai-jigarthanda"]);

        let madurai = catalog.filter(None, Region::Madurai);
        assert_eq!(ids(&madurai), vec!["meenakshi-temple", "madurai-jigarthanda"]);

        let chennai_travel = catalog.filter(Some(Category::Travel), Region::Chennai);
        assert_eq!(ids(&chennai_travel), vec!["marina-beach"]);
    }

    #[test]
    fn test_filter_with_no_matches() {
        let catalog = Catalog::featured();
        assert!(catalog.filter(Some(Category::Events), Region::Salem).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent_for_every_pair() {
        let catalog = Catalog::featured();
        let categories = std::iter::once(None).chain(Category::ALL.into_iter().map(Some));

        for category in categories {
            for region in std::iter::once(Region::All).chain(Region::DISTRICTS.iter().copied()) {
                let first = catalog.filter(category, region);
                let second = catalog.filter(category, region);
                assert_eq!(first, second);

                // Filtered output keeps catalog order
                let positions: Vec<usize> = first
                    .iter()
                    .map(|p| catalog.places().iter().position(|c| c.id == p.id).unwrap())
                    .collect();
                assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_statewide_place_only_matches_all_filter() {
        let mut statewide = Catalog::featured().places()[0].clone();
        statewide.id = "statewide-festival".to_string();
        statewide.region = Region::All;
        let catalog = Catalog::new(vec![statewide]);

        assert_eq!(catalog.filter(None, Region::All).len(), 1);
        assert!(catalog.filter(None, Region::Thanjavur).is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::featured();
        assert_eq!(
            catalog.get("madurai-jigarthanda").map(|p| p.name.as_str()),
            Some("Famous Jigarthanda")
        );
        assert!(catalog.get("missing").is_none());
    }
}
