//! Canned dataset served by `MockApiClient`.

use crate::types::{
    Address, ImageKind, InsuranceProvider, PostalAddress, Procedure, Provider, ProviderImage,
    ProviderType, Review, SearchFilters,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    name: &str,
    provider_type: ProviderType,
    rating: f64,
    review_count: u32,
    price: f64,
    original_price: f64,
    distance: &str,
    address: &str,
    neighborhood: &str,
    availability: &str,
    badges: &[&str],
    accepts_insurance: bool,
    insurance_partners: &[&str],
) -> Provider {
    Provider {
        id: id.to_string(),
        name: name.to_string(),
        provider_type,
        rating,
        review_count,
        price,
        original_price: Some(original_price),
        distance: distance.to_string(),
        address: Address::Line(address.to_string()),
        neighborhood: neighborhood.to_string(),
        availability: availability.to_string(),
        image_url: None,
        badges: Some(strings(badges)),
        accepts_insurance,
        insurance_partners: Some(strings(insurance_partners)),
        about: None,
        specialties: None,
        languages: None,
        accepted_insurance: None,
        images: None,
        reviews: None,
        available_time_slots: None,
        phone: None,
        website: None,
        parking_available: None,
        wheelchair_accessible: None,
        requires_referral: None,
        new_patient_accepted: None,
        negotiated_rate: None,
        standard_rate: None,
        savings: None,
        savings_percent: None,
        insurance: None,
        mario_points: None,
        mario_pick: None,
    }
}

fn flagship() -> Provider {
    let accepted = strings(&[
        "UnitedHealthcare",
        "Aetna",
        "Cigna",
        "Blue Cross Blue Shield",
        "Empire BlueCross",
        "Medicare",
        "Medicaid",
    ]);
    Provider {
        address: Address::Structured(PostalAddress {
            street: "525 East 68th Street".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip: "10065".to_string(),
        }),
        badges: None,
        phone: Some("(212) 746-5454".to_string()),
        website: Some("https://www.nyp.org".to_string()),
        about: Some(
            "NewYork-Presbyterian is one of the nation's most comprehensive academic health care \
             delivery systems, dedicated to providing the highest quality, most compassionate care \
             to patients in the New York metropolitan area and throughout the globe."
                .to_string(),
        ),
        specialties: Some(strings(&[
            "Cardiology",
            "Orthopedics",
            "Neurology",
            "Oncology",
            "Primary Care",
        ])),
        languages: Some(strings(&["English", "Spanish", "Chinese", "Russian"])),
        accepted_insurance: Some(accepted),
        parking_available: Some(true),
        wheelchair_accessible: Some(true),
        requires_referral: Some(false),
        new_patient_accepted: Some(true),
        negotiated_rate: Some(450.0),
        standard_rate: Some(750.0),
        savings: Some(300.0),
        savings_percent: Some(40.0),
        insurance: Some(strings(&["UnitedHealthcare", "Aetna", "Cigna", "Blue Cross"])),
        mario_points: Some(450),
        mario_pick: Some(true),
        images: Some(vec![
            ProviderImage {
                id: "img1".to_string(),
                url: "https://images.unsplash.com/photo-1519494026892-80bbd2d6fd0d?w=800&auto=format&fit=crop".to_string(),
                alt: "Hospital exterior".to_string(),
                kind: ImageKind::Facility,
            },
            ProviderImage {
                id: "img2".to_string(),
                url: "https://images.unsplash.com/photo-1632833239869-a37e3a5806d2?w=800&auto=format&fit=crop".to_string(),
                alt: "Modern waiting area".to_string(),
                kind: ImageKind::Facility,
            },
            ProviderImage {
                id: "img3".to_string(),
                url: "https://images.unsplash.com/photo-1631815589968-fdb09a223b1e?w=800&auto=format&fit=crop".to_string(),
                alt: "Medical equipment".to_string(),
                kind: ImageKind::Equipment,
            },
        ]),
        reviews: Some(vec![
            Review {
                id: "rev1".to_string(),
                patient_name: "Sarah M.".to_string(),
                rating: 5.0,
                date: "2025-10-15".to_string(),
                comment: "Excellent care and very professional staff. The facility is modern and \
                          clean. Wait time was minimal."
                    .to_string(),
                procedure: Some("Routine Physical Exam".to_string()),
            },
            Review {
                id: "rev2".to_string(),
                patient_name: "Michael K.".to_string(),
                rating: 4.0,
                date: "2025-10-10".to_string(),
                comment: "Great experience overall. Dr. Johnson was thorough and explained \
                          everything clearly."
                    .to_string(),
                procedure: Some("Blood Work".to_string()),
            },
            Review {
                id: "rev3".to_string(),
                patient_name: "Jennifer L.".to_string(),
                rating: 5.0,
                date: "2025-10-05".to_string(),
                comment: "Amazing facility with state-of-the-art equipment. Staff was friendly \
                          and accommodating."
                    .to_string(),
                procedure: None,
            },
        ]),
        ..listing(
            "1",
            "NewYork-Presbyterian Hospital",
            ProviderType::Hospital,
            4.8,
            1247,
            450.0,
            750.0,
            "2.3 miles",
            "",
            "Upper East Side",
            "Next available: Tomorrow 9:00 AM",
            &[],
            true,
            &["UnitedHealthcare", "Aetna", "Cigna", "Blue Cross"],
        )
    }
}

/// The twelve fixture providers. Provider `1` carries the full detail-page
/// record; time slots are attached by the mock client at construction.
pub fn providers() -> Vec<Provider> {
    use ProviderType::*;
    vec![
        flagship(),
        listing("2", "Lenox Hill Radiology", ImagingCenter, 4.9, 856, 650.0, 1200.0, "1.8 miles",
            "61 E 77th Street", "Upper East Side", "Next available: Today 2:30 PM",
            &["Same Day Available", "Insurance Partner"], true, &["Cigna", "Aetna", "Oxford"]),
        listing("3", "NYU Langone Health", Hospital, 4.7, 2103, 920.0, 1650.0, "3.2 miles",
            "550 1st Avenue", "Kips Bay", "Next available: Oct 25, 10:00 AM",
            &["Academic Medical Center", "Insurance Partner"], true, &["All major insurers"]),
        listing("4", "CityMD Urgent Care - Chelsea", Clinic, 4.5, 634, 425.0, 800.0, "0.9 miles",
            "215 W 23rd Street", "Chelsea", "Walk-ins welcome",
            &["No Appointment Needed", "Fast Service"], true, &["Most major insurers"]),
        listing("5", "Weill Cornell Imaging", ImagingCenter, 4.6, 421, 780.0, 1400.0, "2.5 miles",
            "1305 York Avenue", "Upper East Side", "Next available: Oct 24, 3:00 PM",
            &["Academic Affiliate", "Insurance Partner"], true, &["Empire", "Aetna", "Cigna"]),
        listing("6", "Downtown Brooklyn Medical", Clinic, 4.4, 312, 550.0, 950.0, "5.7 miles",
            "345 Jay Street", "Downtown Brooklyn", "Next available: Tomorrow 11:00 AM",
            &["Affordable", "Evening Hours"], true, &["Medicaid", "Medicare", "Most insurers"]),
        listing("7", "Manhattan Diagnostic Center", ImagingCenter, 4.9, 1089, 595.0, 1100.0, "1.2 miles",
            "133 E 58th Street", "Midtown East", "Next available: Today 4:00 PM",
            &["Same Day Results", "Premium Equipment"], true, &["All major insurers"]),
        listing("8", "Bellevue Hospital Center", Hospital, 4.3, 892, 720.0, 1350.0, "2.8 miles",
            "462 1st Avenue", "Kips Bay", "Next available: Oct 26, 8:00 AM",
            &["Public Hospital", "Safety Net Provider"], true, &["Medicaid", "Medicare", "All insurers"]),
        listing("9", "Tribeca Health & Wellness", Clinic, 4.7, 445, 680.0, 1150.0, "3.5 miles",
            "78 Worth Street", "Tribeca", "Next available: Tomorrow 1:30 PM",
            &["Holistic Care", "Concierge Service"], false, &[]),
        listing("10", "Brooklyn Heights Imaging", ImagingCenter, 4.6, 567, 620.0, 1080.0, "4.9 miles",
            "142 Joralemon Street", "Brooklyn Heights", "Next available: Oct 25, 9:30 AM",
            &["Insurance Partner", "Free Parking"], true, &["Blue Cross", "Aetna", "Oscar"]),
        listing("11", "Upper West Side Medical Group", Clinic, 4.8, 721, 495.0, 900.0, "3.1 miles",
            "201 W 83rd Street", "Upper West Side", "Next available: Today 5:00 PM",
            &["Family Medicine", "Same Day Available"], true, &["Most major insurers"]),
        listing("12", "Hudson Yards Diagnostic", ImagingCenter, 4.5, 298, 875.0, 1550.0, "1.5 miles",
            "450 W 33rd Street", "Hudson Yards", "Next available: Oct 24, 1:00 PM",
            &["New Facility", "State-of-Art Equipment"], true, &["Aetna", "UnitedHealthcare", "Cigna"]),
    ]
}

pub fn search_filters() -> SearchFilters {
    SearchFilters {
        price_range: (200.0, 2000.0),
        locations: strings(&["Upper East Side", "Chelsea", "Midtown", "Brooklyn Heights"]),
        insurance_providers: strings(&["UnitedHealthcare", "Aetna", "Cigna", "Blue Cross"]),
        specialties: strings(&["Cardiology", "Orthopedics", "Neurology", "Oncology"]),
    }
}

pub fn procedures() -> Vec<Procedure> {
    let p = |id: &str, name: &str, category: &str, description: &str, average_price: f64| Procedure {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        average_price,
    };
    vec![
        p("1", "MRI Scan", "Imaging", "Magnetic Resonance Imaging", 800.0),
        p("2", "CT Scan", "Imaging", "Computed Tomography", 600.0),
        p("3", "Blood Work", "Lab", "Complete Blood Count", 150.0),
        p("4", "Physical Exam", "Primary Care", "Annual Physical Examination", 300.0),
    ]
}

pub fn insurance_providers() -> Vec<InsuranceProvider> {
    let i = |id: &str, name: &str, logo: &str| InsuranceProvider {
        id: id.to_string(),
        name: name.to_string(),
        logo: Some(logo.to_string()),
    };
    vec![
        i("1", "UnitedHealthcare", "/logos/uhc.png"),
        i("2", "Aetna", "/logos/aetna.png"),
        i("3", "Cigna", "/logos/cigna.png"),
        i("4", "Blue Cross Blue Shield", "/logos/bcbs.png"),
    ]
}

/// Morning then afternoon appointment times offered every day.
pub const SLOT_TIMES: [&str; 12] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn provider_ids_are_unique() {
        let all = providers();
        assert_eq!(all.len(), 12);
        let ids: HashSet<_> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn flagship_is_fully_detailed() {
        let p = &providers()[0];
        assert_eq!(p.id, "1");
        assert!(matches!(p.address, Address::Structured(_)));
        assert_eq!(p.reviews.as_ref().map(Vec::len), Some(3));
        assert_eq!(p.images.as_ref().map(Vec::len), Some(3));
        assert_eq!(p.review_count, 1247);
        assert_eq!(p.original_price, Some(750.0));
    }

    #[test]
    fn slot_times_split_morning_and_afternoon() {
        assert_eq!(SLOT_TIMES.iter().filter(|t| t.ends_with("AM")).count(), 6);
        assert_eq!(SLOT_TIMES.iter().filter(|t| t.ends_with("PM")).count(), 6);
    }
}
