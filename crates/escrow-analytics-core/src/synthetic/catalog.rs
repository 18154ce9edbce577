//! Static reference lists for the synthetic book. Texas-only addressing.

pub struct CountyProfile {
    pub name: &'static str,
    pub cities: &'static [&'static str],
    pub zips: &'static [u32],
}

pub const COUNTIES: [CountyProfile; 5] = [
    CountyProfile {
        name: "Collin",
        cities: &["Plano", "Frisco", "Allen", "McKinney"],
        zips: &[75013, 75024, 75025, 75034, 75035, 75070],
    },
    CountyProfile {
        name: "Dallas",
        cities: &["Dallas", "Irving", "Garland", "Mesquite"],
        zips: &[75201, 75204, 75219, 75039, 75062, 75040, 75150],
    },
    CountyProfile {
        name: "Tarrant",
        cities: &["Fort Worth", "Arlington", "Grapevine"],
        zips: &[76102, 76107, 76109, 76010, 76011, 76051],
    },
    CountyProfile {
        name: "Travis",
        cities: &["Austin"],
        zips: &[78701, 78702, 78704, 78745, 78759],
    },
    CountyProfile {
        name: "Harris",
        cities: &["Houston", "Pasadena", "Pearland"],
        zips: &[77002, 77007, 77008, 77024, 77057, 77077, 77095, 77584],
    },
];

pub const INTERACTION_TYPES: [&str; 4] = ["Call", "Email", "Chat", "In-App Message"];

pub const INTERACTION_SUMMARIES: [&str; 5] = [
    "Asked about escrow increase explanation",
    "Requested payment schedule clarification",
    "Inquired about property tax adjustment",
    "Verified insurance premium update",
    "Follow-up on prior escrow analysis letter",
];

pub const FIRST_NAMES: [&str; 32] = [
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda",
    "David", "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
    "Carlos", "Maria", "Luis", "Ana", "Wei", "Mei", "Hiroshi", "Yuki",
    "Ahmed", "Fatima", "Raj", "Priya", "Daniel", "Sofia", "Andre", "Grace",
];

pub const LAST_NAMES: [&str; 32] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
    "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas",
    "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White",
    "Nguyen", "Patel", "Kim", "Chen", "Okafor", "Silva", "Walker", "Young",
];

pub const STREET_NAMES: [&str; 16] = [
    "Oak", "Maple", "Cedar", "Elm", "Pecan", "Bluebonnet", "Mesquite", "Live Oak",
    "Willow", "Magnolia", "Sunset", "Ridge", "Lakeview", "Meadow", "Prairie", "Heritage",
];

pub const STREET_SUFFIXES: [&str; 6] = ["St", "Ave", "Dr", "Ln", "Blvd", "Ct"];

/// Texas area codes for contact numbers.
pub const AREA_CODES: [u32; 6] = [214, 469, 972, 817, 512, 713];
