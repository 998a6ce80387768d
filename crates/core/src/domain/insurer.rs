/// Static reference data for one carrier on the comparison roster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsurerProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub logo: &'static str,
    pub rating: f64,
    pub review_count: u32,
    pub established: u32,
}

/// The fixed five-carrier roster every batch fans out over.
pub const ROSTER: [InsurerProfile; 5] = [
    InsurerProfile {
        id: "insurer-1",
        name: "SafeGuard Insurance",
        logo: "/placeholder.svg?height=40&width=120",
        rating: 4.7,
        review_count: 1243,
        established: 1985,
    },
    InsurerProfile {
        id: "insurer-2",
        name: "Pinnacle Protection",
        logo: "/placeholder.svg?height=40&width=120",
        rating: 4.5,
        review_count: 987,
        established: 1992,
    },
    InsurerProfile {
        id: "insurer-3",
        name: "Liberty Shield",
        logo: "/placeholder.svg?height=40&width=120",
        rating: 4.8,
        review_count: 1567,
        established: 1978,
    },
    InsurerProfile {
        id: "insurer-4",
        name: "Horizon Assurance",
        logo: "/placeholder.svg?height=40&width=120",
        rating: 4.3,
        review_count: 756,
        established: 2001,
    },
    InsurerProfile {
        id: "insurer-5",
        name: "Atlas Coverage",
        logo: "/placeholder.svg?height=40&width=120",
        rating: 4.6,
        review_count: 1102,
        established: 1990,
    },
];

pub fn roster() -> &'static [InsurerProfile] {
    &ROSTER
}

#[cfg(test)]
mod tests {
    use super::roster;

    #[test]
    fn roster_holds_exactly_five_distinct_carriers() {
        let roster = roster();
        assert_eq!(roster.len(), 5);

        let mut ids: Vec<_> = roster.iter().map(|insurer| insurer.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}
