//! Attribute-name tokens.

use newton_schema_core::declare_public_tokens;

declare_public_tokens!(NewtonTokens, NEWTON_TOKENS, [
    self_collision_enabled: "newton:selfCollisionEnabled",
    contact_margin: "newton:contactMargin",
    contact_gap: "newton:contactGap",
    max_hull_vertices: "newton:maxHullVertices",
    torsional_friction: "newton:torsionalFriction",
    rolling_friction: "newton:rollingFriction",
    max_solver_iterations: "newton:maxSolverIterations",
    time_steps_per_second: "newton:timeStepsPerSecond",
    gravity_enabled: "newton:gravityEnabled",
    xpbd_soft_body_relaxation: "newton:xpbd:softBodyRelaxation",
    xpbd_soft_contact_relaxation: "newton:xpbd:softContactRelaxation",
    xpbd_joint_linear_relaxation: "newton:xpbd:jointLinearRelaxation",
    xpbd_joint_angular_relaxation: "newton:xpbd:jointAngularRelaxation",
    xpbd_joint_linear_compliance: "newton:xpbd:jointLinearCompliance",
    xpbd_joint_angular_compliance: "newton:xpbd:jointAngularCompliance",
    xpbd_rigid_contact_relaxation: "newton:xpbd:rigidContactRelaxation",
    xpbd_rigid_contact_con_weighting: "newton:xpbd:rigidContactConWeighting",
    xpbd_angular_damping: "newton:xpbd:angularDamping",
    xpbd_restitution_enabled: "newton:xpbd:restitutionEnabled",
]);

declare_public_tokens!(PhysicsTokens, PHYSICS_TOKENS, [
    gravity_magnitude: "physics:gravityMagnitude",
    joint_enabled: "physics:jointEnabled",
    break_force: "physics:breakForce",
    collision_enabled: "physics:collisionEnabled",
    approximation: "physics:approximation",
    dynamic_friction: "physics:dynamicFriction",
    static_friction: "physics:staticFriction",
    restitution: "physics:restitution",
    density: "physics:density",
    limit_low: "limit:__INSTANCE_NAME__:physics:low",
    limit_high: "limit:__INSTANCE_NAME__:physics:high",
]);

declare_public_tokens!(GeomTokens, GEOM_TOKENS, [
    visibility: "visibility",
    purpose: "purpose",
    double_sided: "doubleSided",
    size: "size",
    radius: "radius",
    height: "height",
]);
