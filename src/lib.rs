pub mod configuration;

pub mod graph {
    pub mod grip;
    pub mod controlpoints;
    pub mod graph;
    pub mod sigmoidgraph;
    pub mod arcgraph;
    pub mod polylinegraph;
    pub mod interpolatedgraph;
    pub mod bezier2graph;
    pub mod graphcontainer;
}

pub mod mapper {
    pub mod mappererror;
    pub mod evaluation;
    pub mod graphhistory;
    pub mod graphmapper;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod intersection;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod piecewisepolynomial;
        }
        pub mod parametriccurve {
            pub mod parametricspline;
            pub mod bezier;
        }
    }
    pub mod interval;
    pub mod remap;
}

pub mod serialization {
    pub mod chunkerror;
    pub mod chunk;
}
