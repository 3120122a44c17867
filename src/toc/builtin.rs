//! Embedded table of contents for the 1313-page edition.

use super::{TocEntry, TocKind};

const fn part(title: &'static str) -> BuiltinEntry {
    BuiltinEntry { kind: TocKind::Part, title, page: None }
}

const fn chapter(title: &'static str, page: u32) -> BuiltinEntry {
    BuiltinEntry { kind: TocKind::Chapter, title, page: Some(page) }
}

const fn section(title: &'static str, page: u32) -> BuiltinEntry {
    BuiltinEntry { kind: TocKind::Section, title, page: Some(page) }
}

pub(super) struct BuiltinEntry {
    kind: TocKind,
    title: &'static str,
    page: Option<u32>,
}

impl BuiltinEntry {
    pub(super) fn to_entry(&self) -> TocEntry {
        TocEntry {
            kind: self.kind,
            title: self.title.to_string(),
            page: self.page,
        }
    }
}

#[rustfmt::skip]
pub(super) static ENTRIES: &[BuiltinEntry] = &[
    part("PART I: FOUNDATIONS"),
    chapter("1. The Role of Algorithms in Computing", 5),
    section("1.1 Algorithms", 5),
    section("1.2 Algorithms as a technology", 12),
    chapter("2. Getting Started", 16),
    section("2.1 Insertion sort", 16),
    section("2.2 Analyzing algorithms", 23),
    section("2.3 Designing algorithms", 30),
    chapter("3. Growth of Functions", 43),
    section("3.1 Asymptotic notation", 43),
    section("3.2 Standard notations and common functions", 54),
    chapter("4. Divide-and-Conquer", 65),
    section("4.1 The maximum-subarray problem", 65),
    section("4.2 Strassen's algorithm", 76),
    section("4.3 Substitution method", 83),
    section("4.4 Recursion-tree method", 91),
    section("4.5 Master method", 99),
    chapter("5. Probabilistic Analysis", 114),
    section("5.1 The hiring problem", 114),
    section("5.2 Indicator random variables", 121),
    section("5.3 Randomized algorithms", 129),
    part("PART II: SORTING AND ORDER STATISTICS"),
    chapter("6. Heapsort", 151),
    section("6.1 Heaps", 151),
    section("6.2 Maintaining the heap property", 156),
    section("6.3 Building a heap", 160),
    section("6.4 The heapsort algorithm", 163),
    section("6.5 Priority queues", 166),
    chapter("7. Quicksort", 170),
    section("7.1 Description of quicksort", 170),
    section("7.2 Performance of quicksort", 179),
    section("7.3 Randomized quicksort", 183),
    chapter("8. Sorting in Linear Time", 191),
    section("8.1 Lower bounds for sorting", 191),
    section("8.2 Counting sort", 196),
    section("8.3 Radix sort", 200),
    section("8.4 Bucket sort", 205),
    chapter("9. Medians and Order Statistics", 213),
    section("9.1 Minimum and maximum", 213),
    section("9.2 Selection in expected linear time", 216),
    section("9.3 Selection in worst-case linear time", 223),
    part("PART III: DATA STRUCTURES"),
    chapter("10. Elementary Data Structures", 232),
    section("10.1 Stacks and queues", 232),
    section("10.2 Linked lists", 237),
    section("10.3 Implementing pointers and objects", 242),
    section("10.4 Representing rooted trees", 247),
    chapter("11. Hash Tables", 253),
    section("11.1 Direct-address tables", 253),
    section("11.2 Hash tables", 257),
    section("11.3 Hash functions", 266),
    section("11.4 Open addressing", 278),
    chapter("12. Binary Search Trees", 286),
    section("12.1 What is a binary search tree?", 286),
    section("12.2 Querying a binary search tree", 291),
    section("12.3 Insertion and deletion", 297),
    chapter("13. Red-Black Trees", 308),
    section("13.1 Properties of red-black trees", 308),
    section("13.2 Rotations", 313),
    section("13.3 Insertion", 317),
    section("13.4 Deletion", 329),
    chapter("14. Augmenting Data Structures", 339),
    section("14.1 Dynamic order statistics", 339),
    section("14.2 How to augment a data structure", 346),
    section("14.3 Interval trees", 351),
    part("PART IV: ADVANCED DESIGN TECHNIQUES"),
    chapter("15. Dynamic Programming", 359),
    section("15.1 Rod cutting", 359),
    section("15.2 Matrix-chain multiplication", 371),
    section("15.3 Elements of dynamic programming", 384),
    section("15.4 Longest common subsequence", 394),
    section("15.5 Optimal binary search trees", 404),
    chapter("16. Greedy Algorithms", 414),
    section("16.1 An activity-selection problem", 414),
    section("16.2 Elements of the greedy strategy", 422),
    section("16.3 Huffman codes", 429),
    chapter("17. Amortized Analysis", 451),
    section("17.1 Aggregate analysis", 451),
    section("17.2 The accounting method", 457),
    section("17.3 The potential method", 462),
    section("17.4 Dynamic tables", 469),
    part("PART V: ADVANCED DATA STRUCTURES"),
    chapter("18. B-Trees", 484),
    section("18.1 Definition of B-trees", 484),
    section("18.2 Basic operations on B-trees", 491),
    section("18.3 Deleting a key from a B-tree", 501),
    chapter("19. Fibonacci Heaps", 505),
    section("19.1 Structure of Fibonacci heaps", 506),
    section("19.2 Mergeable-heap operations", 509),
    section("19.3 Decreasing a key and deleting a node", 518),
    section("19.4 Bounding the maximum degree", 523),
    chapter("20. van Emde Boas Trees", 531),
    section("20.1 Preliminary approaches", 532),
    section("20.2 A recursive structure", 537),
    section("20.3 The van Emde Boas tree", 545),
    chapter("21. Data Structures for Disjoint Sets", 561),
    section("21.1 Disjoint-set operations", 561),
    section("21.2 Linked-list representation", 566),
    section("21.3 Disjoint-set forests", 571),
    section("21.4 Analysis of union by rank with path compression", 579),
    part("PART VI: GRAPH ALGORITHMS"),
    chapter("22. Elementary Graph Algorithms", 589),
    section("22.1 Representations of graphs", 589),
    section("22.2 Breadth-first search", 595),
    section("22.3 Depth-first search", 604),
    section("22.4 Topological sort", 613),
    section("22.5 Strongly connected components", 617),
    chapter("23. Minimum Spanning Trees", 624),
    section("23.1 Growing a minimum spanning tree", 624),
    section("23.2 Kruskal and Prim algorithms", 631),
    chapter("24. Single-Source Shortest Paths", 643),
    section("24.1 Bellman-Ford algorithm", 643),
    section("24.2 Single-source shortest paths in DAGs", 652),
    section("24.3 Dijkstra's algorithm", 657),
    section("24.4 Difference constraints", 669),
    section("24.5 Proofs of shortest-paths properties", 676),
    chapter("25. All-Pairs Shortest Paths", 684),
    section("25.1 Shortest paths and matrix multiplication", 684),
    section("25.2 Floyd-Warshall algorithm", 691),
    section("25.3 Johnson's algorithm", 699),
    chapter("26. Maximum Flow", 708),
    section("26.1 Flow networks", 708),
    section("26.2 Ford-Fulkerson method", 721),
    section("26.3 Maximum bipartite matching", 756),
    part("PART VII: SELECTED TOPICS"),
    chapter("27. Multithreaded Algorithms", 772),
    section("27.1 The basics of dynamic multithreading", 773),
    section("27.2 Multithreaded matrix multiplication", 793),
    section("27.3 Multithreaded merge sort", 800),
    chapter("28. Matrix Operations", 813),
    section("28.1 Solving systems of linear equations", 813),
    section("28.2 Inverting matrices", 828),
    section("28.3 Symmetric positive-definite matrices", 833),
    chapter("29. Linear Programming", 843),
    section("29.1 Standard and slack forms", 850),
    section("29.2 Formulating problems as linear programs", 859),
    section("29.3 The simplex algorithm", 864),
    chapter("30. Polynomials and the FFT", 898),
    section("30.1 Representing polynomials", 899),
    section("30.2 The DFT and FFT", 906),
    section("30.3 Efficient FFT implementations", 915),
    chapter("31. Number-Theoretic Algorithms", 926),
    section("31.1 Elementary number-theoretic notions", 926),
    section("31.2 Greatest common divisor", 933),
    section("31.3 Modular arithmetic", 939),
    section("31.4 Solving modular linear equations", 946),
    section("31.5 The Chinese remainder theorem", 950),
    section("31.6 Powers of an element", 954),
    section("31.7 The RSA public-key cryptosystem", 958),
    section("31.8 Primality testing", 965),
    section("31.9 Integer factorization", 975),
    chapter("32. String Matching", 985),
    section("32.1 The naive string-matching algorithm", 985),
    section("32.2 The Rabin-Karp algorithm", 989),
    section("32.3 String matching with finite automata", 995),
    section("32.4 The Knuth-Morris-Pratt algorithm", 1002),
    chapter("33. Computational Geometry", 1014),
    section("33.1 Line-segment properties", 1015),
    section("33.2 Determining whether any pair of segments intersects", 1021),
    section("33.3 Finding the convex hull", 1029),
    section("33.4 Finding the closest pair of points", 1039),
    chapter("34. NP-Completeness", 1048),
    section("34.1 Polynomial time", 1048),
    section("34.2 Polynomial-time verification", 1058),
    section("34.3 NP-completeness and reducibility", 1066),
    section("34.4 NP-completeness proofs", 1076),
    section("34.5 NP-complete problems", 1086),
    chapter("35. Approximation Algorithms", 1106),
    section("35.1 The vertex-cover problem", 1108),
    section("35.2 The traveling-salesman problem", 1111),
    section("35.3 The set-covering problem", 1117),
    section("35.4 Randomization and linear programming", 1123),
    section("35.5 The subset-sum problem", 1128),
    part("PART VIII: APPENDIX"),
    chapter("A. Summations", 1145),
    chapter("B. Sets, Relations, Functions, Graphs, Trees", 1158),
    chapter("C. Counting and Probability", 1183),
    chapter("D. Matrices", 1217),
];
