//! Bundled data served when the remote tables cannot be read, plus the
//! fixed lists the search box and details page draw from.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::coordinate::Coordinate;
use crate::models::review::{ModerationStatus, Review};
use crate::models::space::{Space, SpaceCategory};

/// Chennai city centre
pub const DEFAULT_COORDINATES: Coordinate = Coordinate {
    latitude: 13.0827,
    longitude: 80.2707,
};

pub const POPULAR_LOCATIONS: [&str; 14] = [
    "T. Nagar, Chennai",
    "OMR, Chennai",
    "Indiranagar, Bangalore",
    "Koramangala, Bangalore",
    "BKC, Mumbai",
    "Andheri West, Mumbai",
    "Connaught Place, Delhi",
    "Cyber City, Gurgaon",
    "Hitech City, Hyderabad",
    "Banjara Hills, Hyderabad",
    "Salt Lake, Kolkata",
    "Pune Camp, Pune",
    "Velachery, Chennai",
    "Guindy, Chennai",
];

pub const GALLERY_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1497366216548-37526070297c?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1524758631624-e2822e304c36?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1497215728101-856f4ea42174?auto=format&fit=crop&w=800&q=80",
];

#[allow(clippy::too_many_arguments)]
fn featured(
    id: &str,
    title: &str,
    location: &str,
    coordinates: (f64, f64),
    price: u32,
    category: SpaceCategory,
    image: &str,
    rating: f32,
    amenities: [&str; 3],
) -> Space {
    Space {
        id: id.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        coordinates: Coordinate::new(coordinates.0, coordinates.1),
        price,
        category,
        image: image.to_string(),
        rating: Some(rating),
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        distance: None,
        capacity: None,
        contact_email: None,
        status: ModerationStatus::Approved,
        created_at: None,
    }
}

pub fn featured_spaces() -> Vec<Space> {
    vec![
        featured(
            "1",
            "Skyline Hub T-Nagar",
            "T. Nagar, Chennai",
            (13.0418, 80.2341),
            4500,
            SpaceCategory::HotDesk,
            "https://picsum.photos/id/48/800/600",
            4.8,
            ["High-speed WiFi", "Coffee", "Printing"],
        ),
        featured(
            "2",
            "The Hive OMR",
            "OMR, Chennai",
            (12.9716, 80.2486),
            8000,
            SpaceCategory::PrivateOffice,
            "https://picsum.photos/id/60/800/600",
            4.9,
            ["24/7 Access", "Meeting Rooms", "Parking"],
        ),
        featured(
            "3",
            "Creative Loft Indiranagar",
            "Indiranagar, Bangalore",
            (12.9716, 77.5946),
            6000,
            SpaceCategory::HotDesk,
            "https://picsum.photos/id/2/800/600",
            4.7,
            ["Community Events", "Pantry", "Lounge"],
        ),
        featured(
            "4",
            "Corporate Suites BKC",
            "BKC, Mumbai",
            (19.0760, 72.8777),
            12000,
            SpaceCategory::PrivateOffice,
            "https://picsum.photos/id/180/800/600",
            5.0,
            ["Premium Address", "Concierge", "Gym"],
        ),
        featured(
            "5",
            "Startup Garage Guindy",
            "Guindy, Chennai",
            (13.0067, 80.2206),
            3500,
            SpaceCategory::HotDesk,
            "https://picsum.photos/id/3/800/600",
            4.6,
            ["Mentorship", "Gaming Zone", "Cafeteria"],
        ),
        featured(
            "6",
            "CoWork Velachery",
            "Velachery, Chennai",
            (12.9801, 80.2228),
            5500,
            SpaceCategory::MeetingRoom,
            "https://picsum.photos/id/20/800/600",
            4.5,
            ["Projector", "Whiteboard", "Conference Call"],
        ),
    ]
}

fn posted_at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn sample(
    id: &str,
    name: &str,
    role: &str,
    image: &str,
    text: &str,
    rating: u8,
    created_at: DateTime<Utc>,
) -> Review {
    Review {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        image: image.to_string(),
        text: text.to_string(),
        rating,
        status: ModerationStatus::Approved,
        created_at,
    }
}

pub fn sample_reviews() -> Vec<Review> {
    vec![
        sample(
            "r1",
            "Priya Sharma",
            "Product Designer",
            "https://picsum.photos/id/64/150/150",
            "NearbySpace made finding a quiet place to work in T. Nagar so easy. The amenities were exactly as listed!",
            5,
            posted_at(2023, 10, 15, 10, 0),
        ),
        sample(
            "r2",
            "Anjali Menon",
            "Freelance Writer",
            "https://picsum.photos/id/65/150/150",
            "I love the zero subscription fee model. I found a great spot in OMR for my client meetings.",
            5,
            posted_at(2023, 11, 2, 14, 30),
        ),
        sample(
            "r3",
            "Deepika Reddy",
            "Tech Lead",
            "https://picsum.photos/id/338/150/150",
            "Highly recommended for startups. We found our first office space in Guindy through this app.",
            4,
            posted_at(2023, 12, 10, 9, 15),
        ),
        sample(
            "r4",
            "Sneha Gupta",
            "Marketing Manager",
            "https://picsum.photos/id/342/150/150",
            "The interface is beautiful and so easy to use. Found a space within 5 minutes of signing up.",
            5,
            posted_at(2024, 1, 5, 16, 20),
        ),
    ]
}
