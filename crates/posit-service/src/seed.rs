//! Initial catalog: three employees and six mediums.

use posit_core::entities::MediumProfile;

pub struct SeedEmployee {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub password: &'static str,
    /// Indexes into [`MEDIUMS`].
    pub mediums: &'static [usize],
}

pub struct SeedMedium {
    pub name: &'static str,
    pub description: &'static str,
    pub profile: fn() -> MediumProfile,
}

pub const EMPLOYEES: [SeedEmployee; 3] = [
    SeedEmployee {
        first_name: "Liam",
        last_name: "Bette",
        email: "liam.bette@posit.if",
        phone: "0600000001",
        password: "toto123",
        mediums: &[0, 2, 5],
    },
    SeedEmployee {
        first_name: "Alexis",
        last_name: "Bosio",
        email: "alexis.bosio@posit.if",
        phone: "0600000002",
        password: "123456",
        mediums: &[1, 2, 4],
    },
    SeedEmployee {
        first_name: "Thibault",
        last_name: "Remy",
        email: "thibault.remy@posit.if",
        phone: "0600000003",
        password: "blabli123",
        mediums: &[0, 1, 3, 4, 5],
    },
];

pub const MEDIUMS: [SeedMedium; 6] = [
    SeedMedium {
        name: "Gwenaël",
        description: "Specialist of great conversations beyond ALL borders.",
        profile: || MediumProfile::Clairvoyant {
            support: "Crystal ball".into(),
        },
    },
    SeedMedium {
        name: "Professeur Maxwell",
        description: "Your future lies ahead of you: let's look at it together!",
        profile: || MediumProfile::Clairvoyant {
            support: "Coffee grounds".into(),
        },
    },
    SeedMedium {
        name: "Mme Irma",
        description: "Understand the people around you through my cards! Fast results.",
        profile: || MediumProfile::TarotReader,
    },
    SeedMedium {
        name: "Endora",
        description: "My cards will answer all your personal questions.",
        profile: || MediumProfile::TarotReader,
    },
    SeedMedium {
        name: "Serena",
        description: "Based in Champigny-sur-Marne, Serena will reveal your future to light up your past.",
        profile: || MediumProfile::Astrologer {
            school: "École Normale Supérieure d'Astrologie (ENS-Astro)".into(),
            promotion_year: 2006,
        },
    },
    SeedMedium {
        name: "Mr M. Histaire-Hyeux",
        description: "Future, future, what do you hold for us? Wait no more, ask to consult me!",
        profile: || MediumProfile::Astrologer {
            school: "Institut des Nouveaux Savoirs Astrologiques".into(),
            promotion_year: 2010,
        },
    },
];
