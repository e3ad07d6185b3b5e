//! Site copy and contact links.
//!
//! All enquiries go through WhatsApp with a prefilled message; the message
//! is percent-encoded into the `text` query parameter. Fixed enquiry texts
//! live in the templates and go through the `whatsapp` filter.

use pencil_gallery_core::{Artwork, ArtworkStatus, Commission};

/// Chat link without a prefilled message.
pub const WHATSAPP_LINK: &str = "https://wa.me/255687187362";

pub const HERO_IMAGES: [&str; 4] = [
    "https://d64gsuwffb70l.cloudfront.net/694d2cebaacc25cb9807268c_1766665552058_ed43ca34.jpg",
    "https://d64gsuwffb70l.cloudfront.net/694d2cebaacc25cb9807268c_1766665577107_6aa1ad60.png",
    "https://d64gsuwffb70l.cloudfront.net/694d2cebaacc25cb9807268c_1766665640470_76c30819.png",
    "https://d64gsuwffb70l.cloudfront.net/694d2cebaacc25cb9807268c_1766665609448_6a5fbfbe.jpg",
];

pub const GALLERY_HERO: &str =
    "https://d64gsuwffb70l.cloudfront.net/694d2cebaacc25cb9807268c_1766665867893_caa301bd.png";

pub const ARTIST_IMAGE: &str = "/static/images/doctor_pencil.jpg";

// =============================================================================
// Enquiry Messages
// =============================================================================

/// WhatsApp chat link with `message` prefilled.
#[must_use]
pub fn whatsapp_link(message: &str) -> String {
    format!("{WHATSAPP_LINK}?text={}", urlencoding::encode(message))
}

/// Enquiry for an artwork: a purchase request while it can be bought,
/// a request to hear back if a reservation falls through, and a request
/// for a similar piece once sold.
#[must_use]
pub fn artwork_enquiry(artwork: &Artwork) -> String {
    match artwork.status {
        ArtworkStatus::Sold => format!(
            "Hello Doctor Pencil! I saw \"{}\" which is sold. Could you create a similar piece for me?",
            artwork.title
        ),
        ArtworkStatus::Reserved => format!(
            "Hello Doctor Pencil! I am interested in \"{}\" ({}), which is reserved. Could you let me know if it becomes available?",
            artwork.title,
            artwork.price.display()
        ),
        ArtworkStatus::Available => format!(
            "Hello Doctor Pencil! I am interested in purchasing \"{}\" ({}). Is it still available?",
            artwork.title,
            artwork.price.display()
        ),
    }
}

/// Enquiry about a project like a past commission.
#[must_use]
pub fn similar_commission_enquiry(commission: &Commission) -> String {
    format!(
        "Hello Doctor Pencil! I saw your commission work \"{}\" and would like to discuss a similar project.",
        commission.title
    )
}

// =============================================================================
// Copy
// =============================================================================

pub struct ArtistBio {
    pub name: &'static str,
    pub location: &'static str,
    pub tagline: &'static str,
    pub paragraphs: &'static [&'static str],
    pub philosophy: &'static str,
}

pub const ARTIST_BIO: ArtistBio = ArtistBio {
    name: "Doctor Pencil",
    location: "Tanzania",
    tagline: "Contemporary Acrylic Artist",
    paragraphs: &[
        "Doctor Pencil is a contemporary acrylic painter based in Tanzania, whose work celebrates the vibrant beauty of African landscapes, wildlife, and people. With bold brushstrokes and a rich palette of warm earth tones, each painting tells a story of heritage, nature, and modern African identity.",
        "Drawing inspiration from the majestic Serengeti, the bustling streets of Dar es Salaam, and the timeless traditions of Tanzanian culture, Doctor Pencil creates art that bridges the gap between traditional African aesthetics and contemporary expression.",
        "Every canvas is a journey: an invitation to experience the warmth, energy, and soul of Africa through the eyes of an artist deeply connected to his roots.",
    ],
    philosophy: "Art should not merely decorate a wall; it should transform a space, evoke emotion, and tell a story that resonates with the viewer's soul.",
};

pub struct Shipping {
    pub local: &'static str,
    pub international: &'static str,
}

pub const SHIPPING: Shipping = Shipping {
    local: "Free delivery within Dar es Salaam. Other Tanzanian regions available at calculated rates.",
    international: "Worldwide shipping available. Paintings are carefully packaged and insured for safe delivery.",
};

pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const SERVICES: [Service; 4] = [
    Service {
        title: "Original Artworks",
        description: "Discover unique acrylic paintings ready to transform your space. Each piece is a one-of-a-kind creation.",
        icon: "palette",
    },
    Service {
        title: "Custom Portraits",
        description: "Commission a personalized portrait that captures the essence of your loved ones or yourself.",
        icon: "user",
    },
    Service {
        title: "Corporate & Hotel Art",
        description: "Large-scale installations and curated collections for hospitality and business environments.",
        icon: "building",
    },
    Service {
        title: "Residential Décor",
        description: "Transform your home with art that reflects your personality and enhances your living space.",
        icon: "home",
    },
];

pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub location: &'static str,
    pub content: &'static str,
    pub rating: u8,
}

pub const TESTIMONIALS: [Testimonial; 5] = [
    Testimonial {
        name: "Sarah Mitchell",
        role: "Interior Designer",
        location: "London, UK",
        content: "Doctor Pencil's artwork transformed my client's living space completely. The vibrant colors and emotional depth of the pieces created exactly the atmosphere we were looking for. Truly exceptional work.",
        rating: 5,
    },
    Testimonial {
        name: "James Okonkwo",
        role: "Hotel Manager",
        location: "Lagos, Nigeria",
        content: "We commissioned a series of paintings for our hotel lobby, and the result exceeded all expectations. Our guests constantly compliment the artwork. Doctor Pencil understood our vision perfectly.",
        rating: 5,
    },
    Testimonial {
        name: "Maria Santos",
        role: "Art Collector",
        location: "São Paulo, Brazil",
        content: "I've collected art from around the world, and Doctor Pencil's pieces stand out for their authenticity and emotional resonance. The African landscapes bring such warmth to my collection.",
        rating: 5,
    },
    Testimonial {
        name: "David Chen",
        role: "Corporate Executive",
        location: "Singapore",
        content: "The custom portrait Doctor Pencil created for our family is absolutely stunning. The attention to detail and the way he captured each person's personality is remarkable.",
        rating: 5,
    },
    Testimonial {
        name: "Amina Hassan",
        role: "Homeowner",
        location: "Dubai, UAE",
        content: "Working with Doctor Pencil was a wonderful experience. The communication was excellent, and the final piece arrived beautifully packaged. It's now the centerpiece of our home.",
        rating: 5,
    },
];
