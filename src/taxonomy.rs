//! Fixed industry taxonomy for the Nordic construction sector.
//!
//! Segment order is significant: the keyword classifier returns the first
//! matching segment, so the taxonomy is kept as an ordered list rather than
//! a map. The taxonomy is an explicit value passed into the classifier so
//! tests can swap in their own.

pub const OTHER_SEGMENT: &str = "Other";
pub const GENERAL_SUBCATEGORY: &str = "General";

#[derive(Debug, Clone)]
pub struct SubcategoryDef {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SegmentDef {
    pub name: String,
    pub keywords: Vec<String>,
    /// Specific subcategories, checked in order before the "General" fallback.
    pub subcategories: Vec<SubcategoryDef>,
}

#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub segments: Vec<SegmentDef>,
}

impl Taxonomy {
    pub fn new(segments: Vec<SegmentDef>) -> Self {
        Self { segments }
    }

    pub fn segment(&self, name: &str) -> Option<&SegmentDef> {
        self.segments.iter().find(|s| s.name == name)
    }

    /// The full construction-sector taxonomy used by both pipelines.
    pub fn construction() -> Self {
        let mut segments = Vec::new();

        segments.push(segment(
            "Core Construction & Civil Engineering",
            &[
                "construction company", "construction work", "construction services",
                "construction contractor", "construction operation", "construction project",
                "contracting services", "excavation work", "groundwork service",
                "demolition services", "road construction", "tunneling", "rock blasting",
                "builder services", "building developer", "house builder",
                "house construction", "residential construction", "modular buildings",
                "real estate development", "property development", "property maintenance",
                "property management", "property renovation",
            ],
            &[
                (
                    "Civil Engineering",
                    &[
                        "civil engineering", "infrastructure", "road", "tunnel",
                        "excavation", "groundwork", "anlegg", "vei", "grunnarbeid",
                    ][..],
                ),
                (
                    "Building Construction",
                    &["building", "construction company", "house builder", "residential", "bygge", "entreprenør"],
                ),
                (
                    "Property Services",
                    &["property", "real estate", "renovation", "maintenance", "eiendom", "rehabilitering", "vedlikehold"],
                ),
            ],
        ));

        segments.push(segment(
            "Specialized Trades",
            &[
                "flooring services", "floor leveling", "tiling", "tiles work",
                "tiles laying", "flooring company", "floor treatment",
                "carpentry work", "carpentry products", "painting services",
                "painting provider", "wall tiles", "surface layering",
                "roofing services", "roofing system", "roofing maintenance",
                "pitched roof", "flat roof",
            ],
            &[
                ("Flooring", &["floor", "tiling", "tiles", "gulv", "flis"][..]),
                ("Carpentry", &["carpentry", "wood", "timber", "tømrer", "snekker"]),
                ("Roofing", &["roof", "roofing", "tak"]),
                ("Painting", &["paint", "coating", "surface", "male", "overflate"]),
            ],
        ));

        segments.push(segment(
            "Mechanical, Electrical & HVAC",
            &[
                "electrical installation", "electrical engineering", "electrical contractor",
                "power installation", "lighting systems", "hvac services", "heating system",
                "ventilation system", "air-treatment installation", "indoor climate",
                "plumbing services", "pipe installation", "drainage systems",
                "geothermal heating",
            ],
            &[
                ("HVAC", &["hvac", "ventilation", "air", "climate", "cooling", "varme", "kjøling"][..]),
                ("Electrical", &["electrical", "power", "lighting", "elektro"]),
                ("Plumbing", &["plumbing", "pipe", "drainage", "sanitary", "rørlegger"]),
                ("Heating", &["heating", "geothermal", "heat pump", "boiler", "oppvarming"]),
            ],
        ));

        segments.push(segment(
            "Marine, Offshore & Energy",
            &[
                "diving & salvage", "marine construction", "marine survey",
                "hydrographic survey", "offshore unit", "oil and gas support",
                "oil and gas pipe", "oil and gas investment", "solar energy",
                "energy efficiency", "renewable energy", "energy consulting",
            ],
            &[],
        ));

        segments.push(segment(
            "Industrial Services & Manufacturing Support",
            &[
                "welding services", "steel cutting", "forging", "machining",
                "rotating equipment maintenance", "concrete pumping", "precast concrete",
                "foam concrete", "concrete technology", "concrete renovation",
                "machine control", "process plant maintenance", "repair and maintenance",
            ],
            &[
                ("Welding & Metalwork", &["welding", "steel", "metal", "forging", "sveising", "stål", "metall"][..]),
                ("Concrete", &["concrete", "cement", "betong"]),
                ("Maintenance", &["maintenance", "repair", "service", "vedlikehold", "reparasjon"]),
            ],
        ));

        segments.push(segment(
            "Building Products & Materials",
            &[
                "building materials", "modular walls", "glass walls",
                "fire retardant wood", "surface materials", "insulation",
                "prefabricated housing", "green construction materials",
                "constructional material",
            ],
            &[],
        ));

        segments.push(segment(
            "Tech & Software for Construction",
            &[
                "project management system", "construction management software",
                "online collaboration", "bim", "3d modeling", "reverse engineering",
                "smart building systems",
            ],
            &[],
        ));

        segments.push(segment(
            "Consulting, Advisory & Project Management",
            &[
                "construction consulting", "engineering consulting", "financial advisory",
                "spatial planning", "architectural consultancy", "design management",
                "project planning", "cost estimation", "technical consulting",
                "environmental consulting", "geotechnical consulting", "remediation services",
            ],
            &[],
        ));

        segments.push(segment(
            "Equipment Rental & Heavy Machinery",
            &[
                "machinery rental", "construction equipment", "crane trucks",
                "scaffolding", "automation machinery", "heavy equipment services",
                "pipeline services", "construction machines repair",
            ],
            &[],
        ));

        segments.push(segment(
            "Facility Services & Real Estate Ops",
            &[
                "building automation", "smart buildings", "energy management systems",
                "property tech", "maintenance services", "damage restoration",
                "dehumidification", "climate control", "insurance claims",
                "remediation", "fire & water damage control",
            ],
            &[],
        ));

        segments.push(segment(
            "Safety & Monitoring Systems",
            &[
                "alarm systems", "surveillance", "access control", "fire safety",
                "radon mitigation", "system installations",
            ],
            &[],
        ));

        segments.push(segment(
            "Environmental & Waste Management",
            &[
                "waste management", "land remediation", "environmental services",
                "asbestos removal", "soil mixing", "decontamination",
            ],
            &[],
        ));

        segments.push(segment(
            "Infrastructure & Public Works",
            &[
                "infrastructure construction", "road development", "railway development",
                "traffic systems", "public facility works",
            ],
            &[],
        ));

        segments.push(segment(
            "Interior Design & Furnishing",
            &[
                "interior services", "office decor", "store design",
                "modular interiors", "window and furnishing installation",
            ],
            &[],
        ));

        Self::new(segments)
    }
}

fn segment(name: &str, keywords: &[&str], subcategories: &[(&str, &[&str])]) -> SegmentDef {
    SegmentDef {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        subcategories: subcategories
            .iter()
            .map(|(sub, kws)| SubcategoryDef {
                name: sub.to_string(),
                keywords: kws.iter().map(|k| k.to_string()).collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_taxonomy_order() {
        let taxonomy = Taxonomy::construction();
        assert_eq!(taxonomy.segments.len(), 14);
        // Insertion order must survive: first-match-wins depends on it.
        assert_eq!(taxonomy.segments[0].name, "Core Construction & Civil Engineering");
        assert_eq!(taxonomy.segments[13].name, "Interior Design & Furnishing");
    }

    #[test]
    fn test_segment_lookup() {
        let taxonomy = Taxonomy::construction();
        let mep = taxonomy.segment("Mechanical, Electrical & HVAC").unwrap();
        assert_eq!(mep.subcategories.len(), 4);
        assert_eq!(mep.subcategories[0].name, "HVAC");
        assert!(taxonomy.segment("Nonexistent").is_none());
    }
}
