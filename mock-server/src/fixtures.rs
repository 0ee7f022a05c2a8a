use crate::{Address, Image, InsuranceProvider, Procedure, Provider, Review};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn address(street: &str, zip: &str) -> Address {
    Address {
        street: street.to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        zip: zip.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn provider(
    id: &str,
    name: &str,
    facility_type: &str,
    rating: f64,
    review_count: u32,
    price: f64,
    original_price: f64,
    distance_miles: f64,
    address: Address,
    neighborhood: &str,
    availability_text: &str,
    specialties: &[&str],
    accepted_insurance: &[&str],
) -> Provider {
    Provider {
        id: id.to_string(),
        name: name.to_string(),
        facility_type: facility_type.to_string(),
        rating,
        review_count,
        price,
        original_price: Some(original_price),
        distance_miles,
        address,
        neighborhood: neighborhood.to_string(),
        availability_text: availability_text.to_string(),
        image_url: None,
        badges: None,
        accepts_insurance: !accepted_insurance.is_empty(),
        insurance_partners: Some(strings(accepted_insurance)),
        about: None,
        specialties: Some(strings(specialties)),
        languages: None,
        accepted_insurance: Some(strings(accepted_insurance)),
        images: None,
        reviews: None,
        phone: None,
        website: None,
        parking_available: None,
        wheelchair_accessible: None,
        requires_referral: None,
        new_patient_accepted: None,
        negotiated_rate: Some(price),
        standard_rate: Some(original_price),
        savings: Some(original_price - price),
        savings_percent: Some(((original_price - price) / original_price * 100.0).round()),
    }
}

pub fn providers() -> Vec<Provider> {
    let mut flagship = provider(
        "1",
        "NewYork-Presbyterian Hospital",
        "hospital",
        4.8,
        1247,
        450.0,
        750.0,
        2.3,
        address("525 East 68th Street", "10065"),
        "Upper East Side",
        "Next available: Tomorrow 9:00 AM",
        &["Cardiology", "Orthopedics", "Neurology", "Oncology", "Radiology"],
        &["UnitedHealthcare", "Aetna", "Cigna", "Medicare"],
    );
    flagship.about = Some("Academic medical center on the Upper East Side.".to_string());
    flagship.languages = Some(strings(&["English", "Spanish", "Chinese"]));
    flagship.phone = Some("(212) 746-5454".to_string());
    flagship.website = Some("https://www.nyp.org".to_string());
    flagship.parking_available = Some(true);
    flagship.wheelchair_accessible = Some(true);
    flagship.requires_referral = Some(false);
    flagship.new_patient_accepted = Some(true);
    flagship.badges = Some(strings(&["Insurance Partner"]));
    flagship.image_url = Some("https://images.example/nyp.jpg".to_string());
    flagship.images = Some(vec![Image {
        id: "img1".to_string(),
        url: "https://images.example/nyp-exterior.jpg".to_string(),
        alt: "Hospital exterior".to_string(),
        kind: "facility".to_string(),
    }]);
    flagship.reviews = Some(vec![
        Review {
            id: "rev1".to_string(),
            patient_name: "Sarah M.".to_string(),
            rating: 5.0,
            date: "2025-10-15".to_string(),
            comment: "Excellent care and very professional staff.".to_string(),
            procedure: Some("Routine Physical Exam".to_string()),
        },
        Review {
            id: "rev2".to_string(),
            patient_name: "Michael K.".to_string(),
            rating: 4.0,
            date: "2025-10-10".to_string(),
            comment: "Thorough and clear.".to_string(),
            procedure: None,
        },
    ]);

    vec![
        flagship,
        provider(
            "2",
            "Lenox Hill Radiology",
            "imaging_center",
            4.9,
            856,
            650.0,
            1200.0,
            1.8,
            address("61 E 77th Street", "10075"),
            "Upper East Side",
            "Next available: Today 2:30 PM",
            &["Radiology", "MRI", "CT"],
            &["Cigna", "Aetna", "Oxford"],
        ),
        provider(
            "3",
            "CityMD Urgent Care - Chelsea",
            "clinic",
            4.5,
            634,
            425.0,
            800.0,
            0.9,
            address("215 W 23rd Street", "10011"),
            "Chelsea",
            "Walk-ins welcome",
            &["Urgent Care", "Primary Care", "Physical Exam"],
            &["UnitedHealthcare", "Aetna"],
        ),
        provider(
            "4",
            "Quest Diagnostics - Midtown",
            "lab",
            4.2,
            310,
            95.0,
            180.0,
            1.1,
            address("200 W 41st Street", "10036"),
            "Midtown",
            "Next available: Today 11:00 AM",
            &["Blood Work", "Lab"],
            &["Medicare", "Medicaid", "Cigna"],
        ),
        provider(
            "5",
            "Manhattan Diagnostic Center",
            "imaging_center",
            4.9,
            1089,
            595.0,
            1100.0,
            1.2,
            address("133 E 58th Street", "10022"),
            "Midtown East",
            "Next available: Today 4:00 PM",
            &["Radiology", "MRI", "Ultrasound"],
            &[],
        ),
    ]
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
    ["UnitedHealthcare", "Aetna", "Cigna", "Medicare"]
        .iter()
        .enumerate()
        .map(|(i, name)| InsuranceProvider {
            id: (i + 1).to_string(),
            name: name.to_string(),
            logo: None,
        })
        .collect()
}

pub const SLOT_DATES: [&str; 2] = ["2025-10-27", "2025-10-28"];
pub const SLOT_TIMES: [&str; 4] = ["09:00 AM", "10:30 AM", "02:00 PM", "03:30 PM"];
